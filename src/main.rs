mod destination;
mod error;
mod model;
mod parser;
mod settings;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use destination::WriteError;
use error::ParseError;
use settings::{Settings, SettingsError};
use source::{DsbError, LoadError};

const EXIT_INVALID_ARGS: u8 = 1;
const EXIT_PARSER_NOT_FOUND: u8 = 2;
const EXIT_FILE_READ_FAILED: u8 = 3;
const EXIT_DSB_LOGIN_FAILED: u8 = 4;
const EXIT_LOADING_FAILED: u8 = 5;
const EXIT_PARSING_FAILED: u8 = 5;
const EXIT_FILE_WRITING_FAILED: u8 = 6;

#[derive(Parser)]
#[command(
    name = "subparser",
    about = "Turn school substitution bulletins into JSON plans"
)]
struct Cli {
    /// Bulletin layout: dsb (alias effner) or website (alias effner-de) [default: dsb]
    #[arg(short = 'P', long)]
    parser: Option<String>,
    /// Where the bulletin comes from: file, dsb or website (alias effner) [default: file]
    #[arg(short, long)]
    source: Option<String>,
    /// Input file, required for the file source
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// DSB user
    #[arg(short, long)]
    user: Option<String>,
    /// DSB or website password
    #[arg(short, long)]
    pass: Option<String>,
    /// File to write the plans to; stdout when unset
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Settings {
            parser: cli.parser,
            source: cli.source,
            input: cli.input,
            user: cli.user,
            pass: cli.pass,
            output: cli.output,
            pretty: cli.pretty,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout may carry the result, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let t0 = Instant::now();
    let job = Settings::load()?.overridden_by(cli.into()).resolve()?;

    let markup = job.source.load().await.context("loading the bulletin failed")?;
    let plans = job
        .parser
        .parse(&markup)
        .with_context(|| format!("parsing with the {:?} parser failed", job.parser))?;
    info!(
        plans = plans.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "parsing completed"
    );

    job.destination
        .write(&plans, job.pretty)
        .context("writing the plans failed")?;
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<SettingsError>() {
        return match e {
            SettingsError::UnknownParser(_) => EXIT_PARSER_NOT_FOUND,
            _ => EXIT_INVALID_ARGS,
        };
    }
    if let Some(e) = err.downcast_ref::<LoadError>() {
        return match e {
            LoadError::File { .. } => EXIT_FILE_READ_FAILED,
            LoadError::Dsb(DsbError::LoginFailed | DsbError::UnknownLogin(_)) => {
                EXIT_DSB_LOGIN_FAILED
            }
            _ => EXIT_LOADING_FAILED,
        };
    }
    if err.downcast_ref::<ParseError>().is_some() {
        return EXIT_PARSING_FAILED;
    }
    if err.downcast_ref::<WriteError>().is_some() {
        return EXIT_FILE_WRITING_FAILED;
    }
    EXIT_INVALID_ARGS
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags() {
        let cli = Cli::try_parse_from([
            "subparser", "-P", "website", "-s", "effner", "-p", "pw", "-o", "out.json", "--pretty",
        ])
        .unwrap();
        let s = Settings::from(cli);
        assert_eq!(s.parser.as_deref(), Some("website"));
        assert_eq!(s.source.as_deref(), Some("effner"));
        assert_eq!(s.pass.as_deref(), Some("pw"));
        assert_eq!(s.output, Some(PathBuf::from("out.json")));
        assert!(s.pretty);
    }

    #[test]
    fn exit_codes_by_stage() {
        let unknown: anyhow::Error = SettingsError::UnknownParser("x".into()).into();
        assert_eq!(exit_code(&unknown), EXIT_PARSER_NOT_FOUND);

        let missing: anyhow::Error = SettingsError::WebsiteNeedsWebsiteParser.into();
        assert_eq!(exit_code(&missing), EXIT_INVALID_ARGS);

        let login = anyhow::Error::from(LoadError::from(DsbError::LoginFailed)).context("loading");
        assert_eq!(exit_code(&login), EXIT_DSB_LOGIN_FAILED);

        let parse = anyhow::Error::from(ParseError::ElementNotFound("table.k")).context("parsing");
        assert_eq!(exit_code(&parse), EXIT_PARSING_FAILED);
    }
}
