use serde::{Deserialize, Serialize};
use std::fmt;

/// Database engine behind a source, parsed from the backend's engine string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Postgres,
    MySql,
    Sqlite,
    Other(String),
}

impl EngineKind {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => EngineKind::Postgres,
            "mysql" | "mariadb" => EngineKind::MySql,
            "sqlite" | "sqlite3" => EngineKind::Sqlite,
            other => EngineKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Postgres => write!(f, "postgresql"),
            EngineKind::MySql => write!(f, "mysql"),
            EngineKind::Sqlite => write!(f, "sqlite"),
            EngineKind::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A resolved logical data provider. Immutable for the duration of one
/// pipeline run; superseded, never mutated, when the source identifier
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub source_id: String,
    pub is_synthetic: bool,
    pub display_name: String,
    pub engine_kind: EngineKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_names_parse_case_insensitively() {
        assert_eq!(EngineKind::from_name("PostgreSQL"), EngineKind::Postgres);
        assert_eq!(EngineKind::from_name("MariaDB"), EngineKind::MySql);
        assert_eq!(
            EngineKind::from_name("CockroachDB"),
            EngineKind::Other("cockroachdb".to_string())
        );
    }
}
