//! Static template table and the closed `TemplateId` enum that indexes it.
//!
//! The integer id only exists at the serialization boundary. Everywhere else a
//! template is a `TemplateId`, so the renderer's dispatch and this table cannot
//! drift apart: adding a variant forces both `TEMPLATES` and the renderer match
//! to be updated.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of selectable years in the start/end pickers.
const YEAR_OPTION_COUNT: i32 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum TemplateId {
    #[default]
    Classic,
    Modern,
    Creative,
    Minimal,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Classic,
        TemplateId::Modern,
        TemplateId::Creative,
        TemplateId::Minimal,
    ];

    pub fn index(self) -> u32 {
        match self {
            TemplateId::Classic => 0,
            TemplateId::Modern => 1,
            TemplateId::Creative => 2,
            TemplateId::Minimal => 3,
        }
    }

    /// Strict lookup: `None` for ids outside the registry.
    pub fn from_index(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.index() == id)
    }

    /// Lenient lookup used at the API boundary. Unknown ids resolve to Classic.
    pub fn resolve(id: u32) -> Self {
        Self::from_index(id).unwrap_or_else(|| {
            warn!(template_id = id, "Unknown template id, falling back to Classic");
            TemplateId::Classic
        })
    }

    pub fn info(self) -> &'static TemplateInfo {
        lookup(self)
    }
}

impl From<u32> for TemplateId {
    fn from(id: u32) -> Self {
        TemplateId::resolve(id)
    }
}

impl From<TemplateId> for u32 {
    fn from(id: TemplateId) -> Self {
        id.index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStyle {
    Classic,
    Modern,
    Creative,
    Minimal,
}

/// One gallery card.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    /// Named accent swatch; resolved to RGB by `render::palette`.
    pub accent: &'static str,
    pub style: TemplateStyle,
}

pub static TEMPLATES: [TemplateInfo; 4] = [
    TemplateInfo {
        id: TemplateId::Classic,
        name: "Classic Blue",
        description: "Professional and traditional layout with blue accents",
        accent: "blue",
        style: TemplateStyle::Classic,
    },
    TemplateInfo {
        id: TemplateId::Modern,
        name: "Modern Maroon",
        description: "Contemporary design with clean sections",
        accent: "maroon",
        style: TemplateStyle::Modern,
    },
    TemplateInfo {
        id: TemplateId::Creative,
        name: "Creative Purple",
        description: "Eye-catching layout for creative professionals",
        accent: "purple",
        style: TemplateStyle::Creative,
    },
    TemplateInfo {
        id: TemplateId::Minimal,
        name: "Minimal Classic",
        description: "Simple and elegant traditional resume",
        accent: "foreground",
        style: TemplateStyle::Minimal,
    },
];

pub fn lookup(id: TemplateId) -> &'static TemplateInfo {
    &TEMPLATES[id.index() as usize]
}

/// Year picker values: this year and the 29 before it, newest first.
pub fn year_options() -> Vec<String> {
    let current = chrono::Utc::now().year();
    (0..YEAR_OPTION_COUNT)
        .map(|offset| (current - offset).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_ids_match_table_positions() {
        for (position, info) in TEMPLATES.iter().enumerate() {
            assert_eq!(info.id.index() as usize, position);
            assert_eq!(lookup(info.id).name, info.name);
        }
    }

    #[test]
    fn test_every_variant_has_a_registry_entry() {
        for id in TemplateId::ALL {
            assert_eq!(id.info().id, id);
        }
    }

    #[test]
    fn test_resolve_out_of_range_falls_back_to_classic() {
        assert_eq!(TemplateId::resolve(4), TemplateId::Classic);
        assert_eq!(TemplateId::resolve(u32::MAX), TemplateId::Classic);
        assert_eq!(TemplateId::resolve(2), TemplateId::Creative);
        assert_eq!(TemplateId::from_index(9), None);
    }

    #[test]
    fn test_template_id_serializes_as_integer() {
        assert_eq!(serde_json::to_value(TemplateId::Minimal).unwrap(), 3);
        let id: TemplateId = serde_json::from_value(serde_json::json!(1)).unwrap();
        assert_eq!(id, TemplateId::Modern);
    }

    #[test]
    fn test_year_options_newest_first() {
        let years = year_options();
        assert_eq!(years.len(), 30);
        let first: i32 = years[0].parse().unwrap();
        let last: i32 = years[29].parse().unwrap();
        assert_eq!(first - last, 29);
        assert_eq!(first, chrono::Utc::now().year());
    }
}
