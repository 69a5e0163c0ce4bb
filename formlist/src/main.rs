//! Terminal host for the dynamic record-list form.
//!
//! Reads form events from a script file or stdin, re-renders the form as
//! text, and writes accepted submissions as JSON Lines.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use formlist::core::types::Field;
use formlist::exit_codes;
use formlist::form::FormState;
use formlist::io::config::{DEFAULT_CONFIG_PATH, FormConfig, load_config, write_config};
use formlist::io::render::FormRenderer;
use formlist::io::script::{ScriptLine, parse_script};
use formlist::io::sink::{JsonlFileSink, WriterSink};
use formlist::logging;
use formlist::run::{RunOptions, check_file, run_script};
use formlist::submit::SubmissionSink;

#[derive(Parser)]
#[command(
    name = "formlist",
    version,
    about = "Dynamic record-list form with validation"
)]
struct Cli {
    /// Path to the config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default config file if missing.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Apply form commands from SCRIPT (or stdin) and render the form.
    Run {
        /// Command script; reads stdin when omitted.
        script: Option<PathBuf>,
        /// Skip commands that address a missing record instead of aborting.
        #[arg(long)]
        keep_going: bool,
    },
    /// Validate a JSON array of records and print per-row messages.
    Check {
        /// JSON file holding `[{"name": .., "age": ..}, ...]`.
        records: PathBuf,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Run { script, keep_going } => {
            cmd_run(&cli.config, script.as_deref(), keep_going)
        }
        Command::Check { records } => cmd_check(&records),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    if !force && config_path.exists() {
        debug!(path = %config_path.display(), "config exists, leaving it");
        return Ok(exit_codes::OK);
    }
    write_config(config_path, &FormConfig::default())
        .with_context(|| format!("write {}", config_path.display()))?;
    Ok(exit_codes::OK)
}

fn cmd_run(config_path: &Path, script: Option<&Path>, keep_going: bool) -> Result<i32> {
    let config = load_config(config_path).context("load config")?;
    let lines = read_script(script)?;
    let renderer = FormRenderer::new(config.render.show_revision);
    let options = RunOptions {
        keep_going,
        render_after_each_event: config.render.after_each_event,
    };

    let mut sink: Box<dyn SubmissionSink> = match &config.submissions_path {
        Some(path) => Box::new(JsonlFileSink::new(path)),
        None => Box::new(WriterSink::new(io::stdout())),
    };

    let mut form = FormState::new();
    let summary = run_script(&mut form, &lines, sink.as_mut(), &options, |snapshot| {
        let rendered = renderer.render(snapshot)?;
        let mut out = io::stdout().lock();
        out.write_all(rendered.as_bytes()).context("write form")?;
        out.flush().context("flush form")?;
        Ok(())
    })?;

    for skipped in &summary.skipped {
        eprintln!("skipped line {}: {}", skipped.line, skipped.reason);
    }

    match summary.last_submit {
        Some(outcome) if !outcome.is_accepted() => Ok(exit_codes::REJECTED),
        _ => Ok(exit_codes::OK),
    }
}

fn cmd_check(records_path: &Path) -> Result<i32> {
    let report = check_file(records_path)?;
    for (index, entry) in report.errors.iter().enumerate() {
        if entry.is_clear() {
            continue;
        }
        for field in Field::ALL {
            let message = entry.get(field);
            if !message.is_empty() {
                println!("[{index}] {message}");
            }
        }
    }
    if report.is_valid() {
        println!("ok: {} record(s) valid", report.errors.len());
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::REJECTED)
    }
}

fn read_script(script: Option<&Path>) -> Result<Vec<ScriptLine>> {
    match script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            parse_script(BufReader::new(file)).with_context(|| format!("parse {}", path.display()))
        }
        None => parse_script(io::stdin().lock()).context("parse stdin"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_with_script() {
        let cli = Cli::parse_from(["formlist", "run", "session.txt", "--keep-going"]);
        match cli.command {
            Command::Run { script, keep_going } => {
                assert_eq!(script, Some(PathBuf::from("session.txt")));
                assert!(keep_going);
            }
            _ => panic!("expected run"),
        }
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn parse_run_from_stdin() {
        let cli = Cli::parse_from(["formlist", "run"]);
        assert!(matches!(
            cli.command,
            Command::Run {
                script: None,
                keep_going: false
            }
        ));
    }

    #[test]
    fn parse_init_force_with_config() {
        let cli = Cli::parse_from(["formlist", "--config", "alt.toml", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }
}
