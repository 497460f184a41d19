//! Domain model for the operations tracker state store.
//!
//! # Responsibility
//! - Define the canonical task, toolbox and snapshot shapes.
//! - Pin the camelCase wire names used by the durable record.
//!
//! # Invariants
//! - Category key sets are closed; they exist only as enum variants.
//! - `createdAt` is assigned at creation and never rewritten afterwards.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod snapshot;
pub mod task;
pub mod toolbox;

/// A collaborator-supplied category key that is not part of the fixed
/// enumeration. Produced by `FromStr` on the category enums; the typed world
/// past that boundary cannot hold an invalid key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory {
    pub category: String,
}

impl Display for UnknownCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown category `{}`", self.category)
    }
}

impl Error for UnknownCategory {}
