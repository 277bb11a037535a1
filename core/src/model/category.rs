use serde::{Deserialize, Serialize};

pub type CategoryId = u64;

pub const DEFAULT_COLOR: &str = "#5B4FE9";
pub const DEFAULT_ICON: &str = "Folder";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    // color and icon are display tokens; nothing here interprets them
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub order: i64,
}

impl Category {
    pub fn from_draft(id: CategoryId, draft: CategoryDraft, order: i64) -> Self {
        Self {
            id,
            name: draft.name,
            color: draft.color.unwrap_or_else(default_color),
            icon: draft.icon.unwrap_or_else(default_icon),
            order,
        }
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Looks up a category, treating unknown ids as uncategorized.
pub fn resolve<'a>(categories: &'a [Category], id: Option<CategoryId>) -> Option<&'a Category> {
    let id = id?;
    categories.iter().find(|c| c.id == id)
}
