use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::prompt_version::{PromptVersion, CURRENT_VERSION};
use crate::enums::version_input::VersionInput;
use crate::errors::{CliError, CliResult};
use crate::logger::change_request_logger::ChangeRequestLogger;
use crate::logger::error_reporter::ErrorReporter;
use crate::services::markup_parser::parse_markup;
use crate::services::markup_writer::to_markup;
use crate::services::prompt_resolver::PromptResolver;
use crate::structs::config::config::Config;

const STDIN_MARKER: &str = "-";

/// Dispatches CLI commands. Every command returns the process exit code.
pub struct CommandRunner {
    config: Config,
    resolver: PromptResolver,
}

impl CommandRunner {
    pub fn new(config: Config) -> Self {
        let resolver = PromptResolver::new(ConfigManager::prompts_dir(&config));
        Self { config, resolver }
    }

    pub fn with_resolver(config: Config, resolver: PromptResolver) -> Self {
        Self { config, resolver }
    }

    pub fn run_command<W: Write>(&self, command: Option<Commands>, out: &mut W) -> CliResult<i32> {
        let start_time = Instant::now();

        let result = match command {
            None => self.prompt_command(None, out),
            Some(Commands::Prompt { version }) => self.prompt_command(version, out),
            Some(Commands::Versions) => self.versions_command(out),
            Some(Commands::Parse { file, json, normalize }) => self.parse_command(file.as_deref(), json, normalize, out),
            Some(Commands::Init) => self.init_command(out),
        };

        log::debug!("⏱️  Command completed in {:.2}s", start_time.elapsed().as_secs_f64());
        result
    }

    fn prompt_command<W: Write>(&self, version: Option<String>, out: &mut W) -> CliResult<i32> {
        let version = version.map_or_else(|| ConfigManager::default_version(&self.config), VersionInput::from);
        log::info!("📖 Loading prompt {:?} from {}", version, self.resolver.prompts_dir().display());

        match self.resolver.resolve(version) {
            Ok(prompt) => {
                out.write_all(prompt.as_bytes())?;
                if !prompt.ends_with('\n') {
                    writeln!(out)?;
                }
                Ok(0)
            }
            Err(error) => Ok(ErrorReporter::report_resolver_error(&error)),
        }
    }

    fn versions_command<W: Write>(&self, out: &mut W) -> CliResult<i32> {
        for version in PromptVersion::ALL {
            let marker = if *version == CURRENT_VERSION { " (current)" } else { "" };
            writeln!(out, "{}{}", version, marker)?;
        }
        Ok(0)
    }

    fn parse_command<W: Write>(&self, file: Option<&Path>, json: bool, normalize: bool, out: &mut W) -> CliResult<i32> {
        let markup = read_markup(file)?;

        match parse_markup(&markup) {
            Ok(request) => {
                log::info!("✅ Parsed change request with {} changes", request.changes.len());
                if json {
                    serde_json::to_writer_pretty(&mut *out, &request)?;
                    writeln!(out)?;
                } else if normalize {
                    out.write_all(to_markup(&request).as_bytes())?;
                } else {
                    out.write_all(ChangeRequestLogger::render(&request).as_bytes())?;
                }
                Ok(0)
            }
            Err(error) => Ok(ErrorReporter::report_parser_error(&error)),
        }
    }

    fn init_command<W: Write>(&self, out: &mut W) -> CliResult<i32> {
        log::info!("🚀 Printing sample configuration");
        out.write_all(ConfigManager::sample_config().as_bytes())?;
        Ok(0)
    }
}

fn read_markup(file: Option<&Path>) -> CliResult<String> {
    match file {
        Some(path) if path != Path::new(STDIN_MARKER) => {
            fs::read_to_string(path).map_err(|source| CliError::MarkupRead {
                origin: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut markup = String::new();
            io::stdin()
                .read_to_string(&mut markup)
                .map_err(|source| CliError::MarkupRead {
                    origin: "stdin".to_string(),
                    source,
                })?;
            Ok(markup)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner_with_prompt(content: &str) -> (tempfile::TempDir, CommandRunner) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("v0.1.md"), content).unwrap();
        let runner = CommandRunner::with_resolver(Config::default(), PromptResolver::new(dir.path()));
        (dir, runner)
    }

    fn run(runner: &CommandRunner, command: Option<Commands>) -> (i32, String) {
        let mut out = Vec::new();
        let code = runner.run_command(command, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_command_prints_current_prompt() {
        let (_dir, runner) = runner_with_prompt("Use the markup.");
        assert_eq!(run(&runner, None), (0, "Use the markup.\n".to_string()));
    }

    #[test]
    fn unknown_version_exits_with_one() {
        let (_dir, runner) = runner_with_prompt("Use the markup.");
        let (code, output) = run(&runner, Some(Commands::Prompt { version: Some("v9.9".into()) }));
        assert_eq!(code, 1);
        assert!(output.is_empty());
    }

    #[test]
    fn versions_lists_current() {
        let (_dir, runner) = runner_with_prompt("");
        assert_eq!(run(&runner, Some(Commands::Versions)), (0, "v0.1 (current)\n".to_string()));
    }

    #[test]
    fn parse_reports_and_normalizes_files() {
        let (dir, runner) = runner_with_prompt("");
        let path = dir.path().join("change.xml");
        fs::write(&path, "<code-change><summary> Fix bug </summary></code-change>").unwrap();

        let (code, report) = run(&runner, Some(Commands::Parse { file: Some(path.clone()), json: false, normalize: false }));
        assert_eq!(code, 0);
        assert!(report.contains("Fix bug"));

        let (_, json) = run(&runner, Some(Commands::Parse { file: Some(path.clone()), json: true, normalize: false }));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"], "Fix bug");

        let (_, markup) = run(&runner, Some(Commands::Parse { file: Some(path), json: false, normalize: true }));
        assert!(markup.contains("<summary>Fix bug</summary>"));
    }

    #[test]
    fn parse_failure_maps_to_exit_code() {
        let (dir, runner) = runner_with_prompt("");
        let path = dir.path().join("change.xml");
        fs::write(&path, "<other/>").unwrap();

        let (code, _) = run(&runner, Some(Commands::Parse { file: Some(path), json: false, normalize: false }));
        assert_eq!(code, 3);
    }

    #[test]
    fn missing_markup_file_is_cli_error() {
        let (dir, runner) = runner_with_prompt("");
        let command = Commands::Parse { file: Some(dir.path().join("absent.xml")), json: false, normalize: false };

        let error = runner.run_command(Some(command), &mut Vec::new()).unwrap_err();
        assert!(matches!(error, CliError::MarkupRead { .. }));
    }
}
