//! Export and import of the store's data.
//!
//! # Responsibility
//! - Produce the on-demand backup document.
//! - Validate import payloads before they may replace any state.
//!
//! # Invariants
//! - Import is strict where load is lenient: `tasks` and `toolbox` must be
//!   present and well-formed, or the payload is rejected whole.
//! - Export never includes the derived reports; they are recomputed after a
//!   round-trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::ident;
use crate::model::snapshot::{ReportsView, Snapshot, TaskBoard, ToolboxShelf};

/// Version stamped into every export document.
pub const EXPORT_VERSION: &str = "1.0.0";

/// On-demand backup of the user's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub tasks: TaskBoard,
    pub toolbox: ToolboxShelf,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

/// Builds the export document for the given snapshot, stamped now.
pub fn export_document(snapshot: &Snapshot) -> ExportDocument {
    ExportDocument {
        tasks: snapshot.tasks.clone(),
        toolbox: snapshot.toolbox.clone(),
        export_date: ident::now(),
        version: EXPORT_VERSION.to_string(),
    }
}

/// Import payload failed shape validation; the store is untouched.
#[derive(Debug)]
pub struct ImportFormatError {
    source: serde_json::Error,
}

impl Display for ImportFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "import payload rejected: {}", self.source)
    }
}

impl Error for ImportFormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Accepted import shape: the durable record or an export file. `reports`
/// is optional and recomputable; `exportDate`/`version` are ignored.
#[derive(Debug, Deserialize)]
struct ImportDocument {
    tasks: TaskBoard,
    toolbox: ToolboxShelf,
    #[serde(default)]
    reports: Option<ReportsView>,
}

/// Validates an import payload and produces the replacement snapshot.
pub fn parse_import(raw: &str) -> Result<Snapshot, ImportFormatError> {
    let document: ImportDocument =
        serde_json::from_str(raw).map_err(|source| ImportFormatError { source })?;
    Ok(Snapshot {
        tasks: document.tasks,
        toolbox: document.toolbox,
        reports: document.reports.unwrap_or_default(),
    })
}
