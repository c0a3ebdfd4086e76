use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::record::{Record, sample_records};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read records file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse records file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse records file {path}: {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown records file format (expected .toml or .json): {0}")]
    UnknownFormat(PathBuf),
}

#[derive(Debug, Clone, Deserialize)]
struct RecordsToml {
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Where the flat record list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    Sample,
    File(PathBuf),
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::Sample => write!(f, "<sample>"),
            RecordSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Records {
    pub source: RecordSource,
    pub records: Vec<Record>,
}

impl Records {
    pub fn sample() -> Self {
        Self {
            source: RecordSource::Sample,
            records: sample_records(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let string = read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let records = Self::parse(path, &string)?;
        debug!(path = %path.display(), records = records.len(), "loaded records file");
        Ok(Self {
            source: RecordSource::File(path.to_owned()),
            records,
        })
    }

    /// Parse `string` in the format named by `path`'s extension.
    pub fn parse(path: &Path, string: &str) -> Result<Vec<Record>, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                let RecordsToml { records } =
                    toml::from_str(string).map_err(|source| ConfigError::Parse {
                        path: path.to_owned(),
                        source,
                    })?;
                Ok(records)
            }
            Some("json") => serde_json::from_str(string).map_err(|source| ConfigError::ParseJson {
                path: path.to_owned(),
                source,
            }),
            _ => Err(ConfigError::UnknownFormat(path.to_owned())),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NodeRole;

    #[test]
    fn parses_toml_records() {
        let toml = r#"
            [[records]]
            id = 1
            name = "root"
            role = "Root"

            [[records]]
            id = 2
            parent_id = 1
            name = "child"
            role = "SimpleNode"
        "#;
        let records = Records::parse(Path::new("records.toml"), toml).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new(1, None, "root", NodeRole::Root),
                Record::new(2, Some(1), "child", NodeRole::SimpleNode),
            ]
        );
    }

    #[test]
    fn toml_without_records_is_empty() {
        let records = Records::parse(Path::new("records.toml"), "").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn parses_json_records() {
        let json = r#"[
            { "id": 1, "parent_id": null, "name": "root", "role": "Root" },
            { "id": 7, "parent_id": 1, "name": "super", "role": "SuperNode" }
        ]"#;
        let records = Records::parse(Path::new("records.json"), json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].role, NodeRole::SuperNode);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = Records::parse(Path::new("records.yaml"), "").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat(_)));
    }

    #[test]
    fn reports_bad_toml_with_path() {
        let err = Records::parse(Path::new("bad.toml"), "[[records]]\nid = \"one\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Records::load(Path::new("/nonexistent/canopy/records.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn forest_fixture_has_two_roots() {
        let records = Records::parse(
            Path::new("forest.toml"),
            include_str!("../fixtures/forest.toml"),
        )
        .unwrap();
        let roots: Vec<&str> = records
            .iter()
            .filter(|r| r.parent_id.is_none())
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(roots, vec!["north", "south"]);
    }

    #[test]
    fn sample_has_a_single_root() {
        let sample = Records::sample();
        assert_eq!(sample.source, RecordSource::Sample);
        assert_eq!(sample.len(), 11);
        let roots = sample.records.iter().filter(|r| r.parent_id.is_none()).count();
        assert_eq!(roots, 1);
    }
}
