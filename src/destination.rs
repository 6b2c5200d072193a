use std::path::PathBuf;

use tracing::info;

use crate::model::Plan;

/// Where the parsed plans go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("could not serialize plans: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Destination {
    pub fn write(&self, plans: &[Plan], pretty: bool) -> Result<(), WriteError> {
        let json = if pretty {
            serde_json::to_string_pretty(plans)?
        } else {
            serde_json::to_string(plans)?
        };

        match self {
            Destination::Stdout => println!("{}", json),
            Destination::File(path) => {
                std::fs::write(path, &json).map_err(|source| WriteError::File {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), plans = plans.len(), "plans written");
            }
        }
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Substitution;

    fn plans() -> Vec<Plan> {
        vec![Plan {
            title: "Vertretungsplan für Freitag, 13.10.2023".into(),
            date: "13.10.2023".into(),
            created_at: None,
            absences: vec![],
            infos: vec!["Wandertag".into()],
            substitutions: vec![Substitution {
                class: "5A".into(),
                teacher: "Mül".into(),
                period: "3".into(),
                room: "104".into(),
                ..Default::default()
            }],
        }]
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("subparser-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn file_gets_json_array() {
        let path = temp_path("plain");
        Destination::File(path.clone()).write(&plans(), false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(!written.contains('\n'));
        let back: Vec<Plan> = serde_json::from_str(&written).unwrap();
        assert_eq!(back, plans());
    }

    #[test]
    fn pretty_output_is_indented() {
        let path = temp_path("pretty");
        Destination::File(path.clone()).write(&plans(), true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(written.starts_with("[\n  {"));
        assert!(written.contains("\"room\": \"104\""));
        assert!(!written.contains("\"substitute\""));
    }

    #[test]
    fn unwritable_path_is_a_file_error() {
        let path = PathBuf::from("tests/fixtures/no-such-dir/out.json");
        let err = Destination::File(path).write(&plans(), false).unwrap_err();
        assert!(matches!(err, WriteError::File { .. }));
    }
}
