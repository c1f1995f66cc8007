use std::fmt::Write;

use crate::structs::change::Change;
use crate::structs::change_request::ChangeRequest;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub struct ChangeRequestLogger {}

impl ChangeRequestLogger {
    pub fn print_report(request: &ChangeRequest) {
        print!("{}", Self::render(request));
    }

    /// Plain-text report of a parsed change request.
    pub fn render(request: &ChangeRequest) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "📋 Summary");
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "{}", request.summary);

        if !request.files_to_change.is_empty() {
            let _ = writeln!(out, "\n📁 Files to change ({})", request.files_to_change.len());
            for name in request.file_names() {
                let _ = writeln!(out, "   • {}", name);
            }
        }

        if !request.changes.is_empty() {
            let _ = writeln!(
                out,
                "\n🛠️  Changes ({} files, {} operations)",
                request.changes.len(),
                request.total_operations()
            );
            for change in &request.changes {
                Self::render_change(&mut out, change);
            }
        }

        Self::render_steps(&mut out, "🔧 Additional steps", &request.additional_steps);
        Self::render_steps(&mut out, "✅ Verification", &request.verification_steps);

        out
    }

    fn render_change(out: &mut String, change: &Change) {
        let _ = writeln!(out, "\n📄 {}", change.file_name);

        for modify in &change.modifications {
            let range = match (modify.start_line, modify.end_line) {
                (Some(start), Some(end)) => format!("lines {}-{}", start, end),
                (Some(start), None) => format!("from line {}", start),
                (None, Some(end)) => format!("through line {}", end),
                (None, None) => "whole file".to_string(),
            };
            let _ = writeln!(out, "@@ Modify {} @@", range);
            Self::render_block(out, "~", &modify.content);
        }

        for add in &change.additions {
            let _ = writeln!(out, "@@ Add @@");
            Self::render_block(out, "+", &add.content);
        }

        if !change.deletions.is_empty() {
            let _ = writeln!(out, "@@ Delete file @@");
        }
    }

    fn render_block(out: &mut String, marker: &str, content: &str) {
        for line in content.lines() {
            let _ = writeln!(out, "{} {}", marker, line);
        }
    }

    fn render_steps(out: &mut String, title: &str, steps: &[String]) {
        if steps.is_empty() {
            return;
        }

        let _ = writeln!(out, "\n{}", title);
        for (index, step) in steps.iter().enumerate() {
            let _ = writeln!(out, "   {}. {}", index + 1, step);
        }
    }
}
