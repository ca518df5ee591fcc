use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: i64,
    pub org_id: i64,
    pub name: String,
    pub created_at: String,
}

/// Theme palette a status may be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    #[default]
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }

    /// Parse a palette name, degrading to gray for anything unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gray" | "grey" => Ok(Self::Gray),
            "red" => Ok(Self::Red),
            "orange" => Ok(Self::Orange),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            "purple" => Ok(Self::Purple),
            "pink" => Ok(Self::Pink),
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Status {
    pub id: i64,
    pub org_id: i64,
    pub key: String,
    pub name: String,
    pub color: StatusColor,
    pub order: i32,
    pub is_system: bool,
    pub show_on_roadmap: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Statuses seeded into every new organization: (key, name, color).
pub const SYSTEM_STATUSES: [(&str, &str, StatusColor); 4] = [
    ("open", "Open", StatusColor::Blue),
    ("planned", "Planned", StatusColor::Purple),
    ("in_progress", "In Progress", StatusColor::Yellow),
    ("completed", "Completed", StatusColor::Green),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i64,
    pub board_id: i64,
    pub title: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields an admin may change on an existing status. The key is not here.
#[derive(Debug, Clone, Default)]
pub struct StatusPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub show_on_roadmap: Option<bool>,
}

/// Outcome of a delete call.
///
/// The probe call either deletes an unused status outright or reports how many
/// posts block it; the confirm call always reports how many posts moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeleteOutcome {
    #[serde(rename_all = "camelCase")]
    RequiresReassignment {
        requires_reassignment: bool,
        post_count: i64,
    },
    #[serde(rename_all = "camelCase")]
    Deleted {
        deleted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reassigned_count: Option<i64>,
    },
}

impl DeleteOutcome {
    pub fn requires_reassignment(post_count: i64) -> Self {
        Self::RequiresReassignment {
            requires_reassignment: true,
            post_count,
        }
    }

    pub fn deleted(reassigned_count: Option<i64>) -> Self {
        Self::Deleted {
            deleted: true,
            reassigned_count,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { deleted: true, .. })
    }
}

// API view types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanbanView {
    pub organization: Organization,
    pub columns: Vec<StatusColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapView {
    pub organization: Organization,
    pub columns: Vec<StatusColumn>,
}

/// One column of the board. `key` is `None` for the fallback column holding
/// posts whose status no longer resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusColumn {
    pub key: Option<String>,
    pub name: String,
    pub color: StatusColor,
    pub posts: Vec<Post>,
}

impl StatusColumn {
    pub fn for_status(status: &Status, posts: Vec<Post>) -> Self {
        Self {
            key: Some(status.key.clone()),
            name: status.name.clone(),
            color: status.color,
            posts,
        }
    }

    pub fn unknown(posts: Vec<Post>) -> Self {
        Self {
            key: None,
            name: "Unknown".to_string(),
            color: StatusColor::Gray,
            posts,
        }
    }
}
