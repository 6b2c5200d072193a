pub mod dsb;
pub mod website;

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use tracing::info;

pub use dsb::DsbError;
use website::WebsiteError;

/// Where the raw bulletin is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceKind {
    #[default]
    File,
    /// DSBmobile API, needs user and password.
    Dsb,
    /// Password protected plan page of the school website.
    #[value(alias = "effner")]
    Website,
}

/// A configured source, ready to load.
#[derive(Clone)]
pub enum Source {
    File { path: PathBuf },
    Dsb { user: String, pass: String },
    Website { password: String },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Dsb(#[from] DsbError),
    #[error(transparent)]
    Website(#[from] WebsiteError),
}

impl Source {
    pub async fn load(&self) -> Result<String, LoadError> {
        info!(source = %self, "loading bulletin");
        match self {
            Source::File { path } => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::File {
                    path: path.clone(),
                    source,
                }),
            Source::Dsb { user, pass } => Ok(dsb::fetch_bulletin(user, pass).await?),
            Source::Website { password } => Ok(website::fetch_plan_page(password).await?),
        }
    }
}

// Credentials stay out of logs and debug output.
impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File { path } => write!(f, "file {}", path.display()),
            Source::Dsb { user, .. } => write!(f, "DSB as {}", user),
            Source::Website { .. } => f.write_str("school website"),
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_reads_whole_file() {
        let source = Source::File {
            path: "tests/fixtures/single_day.html".into(),
        };
        let markup = source.load().await.unwrap();
        assert!(markup.contains(r#"<a name="13.10.2023">"#));
    }

    #[tokio::test]
    async fn missing_file_is_a_file_error() {
        let source = Source::File {
            path: "tests/fixtures/does_not_exist.html".into(),
        };
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, LoadError::File { .. }));
        assert!(err.to_string().contains("does_not_exist.html"));
    }

    #[test]
    fn display_hides_secrets() {
        let dsb = Source::Dsb {
            user: "123456".into(),
            pass: "geheim".into(),
        };
        let site = Source::Website {
            password: "geheim".into(),
        };
        assert_eq!(dsb.to_string(), "DSB as 123456");
        assert!(!format!("{:?}", dsb).contains("geheim"));
        assert!(!format!("{:?}", site).contains("geheim"));
    }
}
