use serde::{Deserialize, Serialize};

/// Key participation of a column, as reported by the source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    Primary,
    Unique,
    None,
}

impl KeyRole {
    /// Maps the backend's key tag (MySQL-style `PRI`/`UNI` or spelled-out
    /// variants) to a role. Anything unrecognized is `None`.
    pub fn from_wire(tag: Option<&str>) -> Self {
        match tag.map(str::to_ascii_lowercase).as_deref() {
            Some("pri") | Some("primary") | Some("pk") => KeyRole::Primary,
            Some("uni") | Some("unique") => KeyRole::Unique,
            _ => KeyRole::None,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            KeyRole::Primary => Some("primary key"),
            KeyRole::Unique => Some("unique"),
            KeyRole::None => None,
        }
    }
}

/// One physical column as reported by the backend or the sample generator.
/// Lives for a single schema-load cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawColumnMeta {
    pub name: String,
    pub declared_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub key_role: KeyRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tags_map_case_insensitively() {
        assert_eq!(KeyRole::from_wire(Some("PRI")), KeyRole::Primary);
        assert_eq!(KeyRole::from_wire(Some("unique")), KeyRole::Unique);
        assert_eq!(KeyRole::from_wire(Some("MUL")), KeyRole::None);
        assert_eq!(KeyRole::from_wire(None), KeyRole::None);
    }
}
