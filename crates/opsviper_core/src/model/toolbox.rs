//! Toolbox domain model.
//!
//! # Responsibility
//! - Define the knowledge-base item record and its seven category schemas.
//! - Keep each category's field set as a typed variant, not a field bag.
//!
//! # Invariants
//! - An item's `fields` variant determines the only category list that may
//!   own it; the store rejects a payload addressed to another category.
//! - `created_at` is set once at creation; `updated_at` changes only when an
//!   update command carries a replacement value.

use crate::ident::EntryId;
use crate::model::UnknownCategory;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::task::Priority;

/// Fixed partition keys for toolbox collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolboxCategory {
    Systems,
    Processes,
    Equipment,
    Software,
    Team,
    KeyEvents,
    Ideas,
}

impl ToolboxCategory {
    pub const ALL: [ToolboxCategory; 7] = [
        Self::Systems,
        Self::Processes,
        Self::Equipment,
        Self::Software,
        Self::Team,
        Self::KeyEvents,
        Self::Ideas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Systems => "systems",
            Self::Processes => "processes",
            Self::Equipment => "equipment",
            Self::Software => "software",
            Self::Team => "team",
            Self::KeyEvents => "keyEvents",
            Self::Ideas => "ideas",
        }
    }
}

impl Display for ToolboxCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolboxCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "systems" => Ok(Self::Systems),
            "processes" => Ok(Self::Processes),
            "equipment" => Ok(Self::Equipment),
            "software" => Ok(Self::Software),
            "team" => Ok(Self::Team),
            "keyEvents" => Ok(Self::KeyEvents),
            "ideas" => Ok(Self::Ideas),
            other => Err(UnknownCategory {
                category: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Active,
    Inactive,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Operational,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventKind {
    Milestone,
    Deadline,
    Meeting,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaStatus {
    New,
    Reviewing,
    Approved,
    Rejected,
}

/// Category-specific payload of a toolbox item, tagged by category on the
/// wire so persisted items stay self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum ToolboxFields {
    #[serde(rename_all = "camelCase")]
    Systems {
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        version: Option<String>,
        #[serde(default)]
        status: Option<SystemStatus>,
    },
    #[serde(rename_all = "camelCase")]
    Processes {
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        owner: Option<String>,
        #[serde(default)]
        frequency: Option<ProcessFrequency>,
    },
    #[serde(rename_all = "camelCase")]
    Equipment {
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        serial_number: Option<String>,
        #[serde(default)]
        status: Option<EquipmentStatus>,
    },
    #[serde(rename_all = "camelCase")]
    Software {
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        version: Option<String>,
        #[serde(default)]
        license: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Team {
        name: String,
        #[serde(default)]
        role: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        department: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    KeyEvents {
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        date: Option<NaiveDate>,
        #[serde(default, rename = "type")]
        kind: Option<KeyEventKind>,
    },
    #[serde(rename_all = "camelCase")]
    Ideas {
        title: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        priority: Option<Priority>,
        #[serde(default)]
        status: Option<IdeaStatus>,
    },
}

impl ToolboxFields {
    /// The category list this payload belongs to.
    pub fn category(&self) -> ToolboxCategory {
        match self {
            Self::Systems { .. } => ToolboxCategory::Systems,
            Self::Processes { .. } => ToolboxCategory::Processes,
            Self::Equipment { .. } => ToolboxCategory::Equipment,
            Self::Software { .. } => ToolboxCategory::Software,
            Self::Team { .. } => ToolboxCategory::Team,
            Self::KeyEvents { .. } => ToolboxCategory::KeyEvents,
            Self::Ideas { .. } => ToolboxCategory::Ideas,
        }
    }

    /// Display label: `name` for most variants, `title` for ideas.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Systems { name, .. }
            | Self::Processes { name, .. }
            | Self::Equipment { name, .. }
            | Self::Software { name, .. }
            | Self::Team { name, .. }
            | Self::KeyEvents { name, .. } => name,
            Self::Ideas { title, .. } => title,
        }
    }
}

/// A knowledge-base entry, owned by exactly one toolbox category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolboxItem {
    pub id: EntryId,
    #[serde(flatten)]
    pub fields: ToolboxFields,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ToolboxItem {
    pub fn new(id: EntryId, created_at: DateTime<Utc>, fields: ToolboxFields) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at: None,
        }
    }
}
