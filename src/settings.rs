use std::path::PathBuf;

use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::destination::Destination;
use crate::parser::ParserKind;
use crate::source::{Source, SourceKind};

const CONFIG_FILE: &str = "subparser";
const ENV_PREFIX: &str = "SUBPARSER";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("parser '{0}' not found, allowed: dsb (effner), website (effner-de)")]
    UnknownParser(String),
    #[error("unknown source type '{0}', allowed: file, dsb, website (effner)")]
    UnknownSource(String),
    #[error("the {kind} source requires {field}")]
    Missing {
        kind: &'static str,
        field: &'static str,
    },
    #[error("the website source only works with the website parser")]
    WebsiteNeedsWebsiteParser,
    #[error("could not load settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Raw settings as given by the config file, the environment or the command
/// line. Kinds stay strings until [`Settings::resolve`] checks them.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub parser: Option<String>,
    pub source: Option<String>,
    pub input: Option<PathBuf>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

/// A fully validated run.
#[derive(Debug)]
pub struct Job {
    pub parser: ParserKind,
    pub source: Source,
    pub destination: Destination,
    pub pretty: bool,
}

impl Settings {
    /// Optional `subparser.{toml,json,yaml,..}` in the working directory,
    /// overridden by `SUBPARSER_*` variables.
    pub fn load() -> Result<Self, SettingsError> {
        Ok(Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?)
    }

    /// Values set in `other` win.
    pub fn overridden_by(self, other: Settings) -> Settings {
        Settings {
            parser: other.parser.or(self.parser),
            source: other.source.or(self.source),
            input: other.input.or(self.input),
            user: other.user.or(self.user),
            pass: other.pass.or(self.pass),
            output: other.output.or(self.output),
            pretty: other.pretty || self.pretty,
        }
    }

    pub fn resolve(self) -> Result<Job, SettingsError> {
        let parser = match self.parser.as_deref() {
            None => ParserKind::default(),
            Some(tag) => ParserKind::from_str(tag, true)
                .map_err(|_| SettingsError::UnknownParser(tag.to_string()))?,
        };
        let source_kind = match self.source.as_deref() {
            None => SourceKind::default(),
            Some(tag) => SourceKind::from_str(tag, true)
                .map_err(|_| SettingsError::UnknownSource(tag.to_string()))?,
        };

        let source = match source_kind {
            SourceKind::File => Source::File {
                path: self.input.ok_or(SettingsError::Missing {
                    kind: "file",
                    field: "an input path",
                })?,
            },
            SourceKind::Dsb => match (non_empty(self.user), non_empty(self.pass)) {
                (Some(user), Some(pass)) => Source::Dsb { user, pass },
                _ => {
                    return Err(SettingsError::Missing {
                        kind: "dsb",
                        field: "user and password",
                    })
                }
            },
            SourceKind::Website => {
                let password = non_empty(self.pass).ok_or(SettingsError::Missing {
                    kind: "website",
                    field: "a password",
                })?;
                if parser != ParserKind::Website {
                    return Err(SettingsError::WebsiteNeedsWebsiteParser);
                }
                Source::Website { password }
            }
        };

        let destination = match self.output {
            Some(path) => Destination::File(path),
            None => Destination::Stdout,
        };

        Ok(Job {
            parser,
            source,
            destination,
            pretty: self.pretty,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ── Tests ──
