use std::fmt::Write;

use crate::helpers::text::{escape_attribute, escape_text};
use crate::structs::change::Change;
use crate::structs::change_request::ChangeRequest;

const INDENT: &str = "    ";

/// Renders a change request back into the markup dialect accepted by the parser.
///
/// Text is escaped rather than wrapped in CDATA, so any content survives a
/// parse of the output unchanged.
pub fn to_markup(request: &ChangeRequest) -> String {
    let mut out = String::new();

    out.push_str("<code-change>\n");
    element(&mut out, 1, "summary", &request.summary);

    if !request.files_to_change.is_empty() {
        open(&mut out, 1, "files-to-change");
        for file in &request.files_to_change {
            line(&mut out, 2, &format!("<file name=\"{}\" />", escape_attribute(&file.name)));
        }
        close(&mut out, 1, "files-to-change");
    }

    if !request.changes.is_empty() {
        open(&mut out, 1, "changes");
        for change in &request.changes {
            write_change(&mut out, change);
        }
        close(&mut out, 1, "changes");
    }

    write_steps(&mut out, "additional-steps", &request.additional_steps);
    write_steps(&mut out, "verification", &request.verification_steps);

    out.push_str("</code-change>\n");
    out
}

fn write_change(out: &mut String, change: &Change) {
    line(out, 2, &format!("<change file-name=\"{}\">", escape_attribute(&change.file_name)));

    for modify in &change.modifications {
        let mut tag = String::from("modify");
        if let Some(start) = modify.start_line {
            let _ = write!(tag, " start-line=\"{}\"", start);
        }
        if let Some(end) = modify.end_line {
            let _ = write!(tag, " end-line=\"{}\"", end);
        }
        line(out, 3, &format!("<{}>{}</modify>", tag, text_content(&modify.content)));
    }

    for add in &change.additions {
        element(out, 3, "add", &add.content);
    }

    for _ in &change.deletions {
        line(out, 3, "<delete />");
    }

    close(out, 2, "change");
}

fn write_steps(out: &mut String, section: &str, steps: &[String]) {
    if steps.is_empty() {
        return;
    }

    open(out, 1, section);
    for step in steps {
        element(out, 2, "step", step);
    }
    close(out, 1, section);
}

fn element(out: &mut String, depth: usize, tag: &str, text: &str) {
    line(out, depth, &format!("<{tag}>{}</{tag}>", text_content(text), tag = tag));
}

// An element without any text child reads back as a missing field, so empty
// text is written as a single space, which trims back to "".
fn text_content(text: &str) -> String {
    if text.is_empty() {
        return " ".to_string();
    }
    escape_text(text)
}

fn open(out: &mut String, depth: usize, tag: &str) {
    line(out, depth, &format!("<{}>", tag));
}

fn close(out: &mut String, depth: usize, tag: &str) {
    line(out, depth, &format!("</{}>", tag));
}

fn line(out: &mut String, depth: usize, text: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(text);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::markup_parser::parse_markup;
    use crate::structs::change::{Add, Delete, Modify};
    use crate::structs::file_ref::FileRef;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_minimal_request() {
        let request = ChangeRequest {
            summary: "Simple change".into(),
            files_to_change: vec![],
            changes: vec![],
            additional_steps: vec![],
            verification_steps: vec![],
        };

        assert_eq!(
            to_markup(&request),
            "<code-change>\n    <summary>Simple change</summary>\n</code-change>\n"
        );
    }

    #[test]
    fn output_parses_back_to_the_same_request() {
        let mut change = Change::new("src/a&b.rs");
        change.modifications.push(Modify {
            start_line: Some(3),
            end_line: None,
            content: "if a < b && c > d {\n    run();\n}".into(),
        });
        change.additions.push(Add { content: "fn main() {}".into() });
        change.deletions.push(Delete {});

        let request = ChangeRequest {
            summary: "Quote \"things\" & <escape> them".into(),
            files_to_change: vec![FileRef::new("src/a&b.rs")],
            changes: vec![change],
            additional_steps: vec!["cargo fmt".into()],
            verification_steps: vec!["cargo test".into()],
        };

        let reparsed = parse_markup(&to_markup(&request)).unwrap();
        assert_eq!(reparsed, request);
    }

    #[test]
    fn empty_text_survives_reparse() {
        let mut change = Change::new("a.py");
        change.additions.push(Add { content: String::new() });

        let request = ChangeRequest {
            summary: "s".into(),
            files_to_change: vec![],
            changes: vec![change],
            additional_steps: vec![String::new()],
            verification_steps: vec![],
        };

        assert_eq!(parse_markup(&to_markup(&request)).unwrap(), request);
    }
}
