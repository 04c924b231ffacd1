mod link;
mod project;
mod tool;
mod work;

pub use link::{Link, LinkDraft, LinkPatch};
pub use project::{Project, ProjectDraft, ProjectPatch};
pub use tool::{Tool, ToolDraft, ToolPatch, DEFAULT_TOOL_CATEGORIES};
pub use work::{Work, WorkDraft, WorkPatch, WorkProject};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{FolioError, Result};

/// The content kinds that each own one JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Work,
    Project,
    Link,
    Tool,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Work, Kind::Project, Kind::Link, Kind::Tool];

    /// Name used in messages and errors
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Work => "work",
            Kind::Project => "project",
            Kind::Link => "link",
            Kind::Tool => "tool",
        }
    }

    /// Default document file name under the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Kind::Work => "work.json",
            Kind::Project => "projects.json",
            Kind::Link => "links.json",
            Kind::Tool => "tools.json",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(Kind::Work),
            "project" | "projects" => Ok(Kind::Project),
            "link" | "links" => Ok(Kind::Link),
            "tool" | "tools" => Ok(Kind::Tool),
            _ => Err(format!("Invalid kind: {}", s)),
        }
    }
}

/// A `{label, href}` pair attached to projects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabeledLink {
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub href: String,
}

/// An entity stored in a flat `{ "items": [...] }` document.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: Kind;

    /// Creation payload
    type Draft;
    /// Partial update; `None` fields leave the stored value alone
    type Patch;

    /// Identity within the store: the slug, or the natural key
    fn key(&self) -> &str;

    /// Validate a draft and build the entity, deriving its identity.
    fn from_draft(draft: Self::Draft) -> Result<Self>;

    /// Shallow-merge a patch over this entity.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Free-text period used to order listings, if this kind is ordered
    fn chronology(&self) -> Option<&str> {
        None
    }
}

/// Fail with a validation error when `value` is empty or whitespace.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FolioError::validation(field, "is required"));
    }
    Ok(())
}

/// Read an explicit `null` as the field's default, like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("work".parse::<Kind>().unwrap(), Kind::Work);
        assert_eq!("Projects".parse::<Kind>().unwrap(), Kind::Project);
        assert_eq!("link".parse::<Kind>().unwrap(), Kind::Link);
        assert_eq!("TOOLS".parse::<Kind>().unwrap(), Kind::Tool);
        assert!("posts".parse::<Kind>().is_err());
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("title", "x").is_ok());
        assert!(matches!(
            require("title", "   "),
            Err(FolioError::Validation { field, .. }) if field == "title"
        ));
    }

    #[test]
    fn test_null_fields_read_as_default() {
        let link: LabeledLink = serde_json::from_str(r#"{"label": null, "href": "/x"}"#).unwrap();
        assert_eq!(link.label, "");
        assert_eq!(link.href, "/x");
    }

    #[test]
    fn test_merge() {
        let mut value = "old".to_string();
        merge(&mut value, None);
        assert_eq!(value, "old");
        merge(&mut value, Some(String::new()));
        assert_eq!(value, "");
    }
}
