//! `[mirror]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [mirror]
//! missing_child = "insert"    # insert | drop
//! ```
//!
//! `missing_child` decides what happens to a rebuilt directory whose parent
//! is in the mirror but has no child of that name yet (a directory created
//! or renamed since the last scan): `insert` adds it, `drop` discards it
//! until an ancestor is rescanned.

use serde::{Deserialize, Serialize};

use crate::tree::MissingChild;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorSectionConfig {
    pub missing_child: MissingChild,
}
