//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path helpers (`normalize_path`, `relative_segments`, `common_ancestor`)

pub mod fs;

pub use fs::{common_ancestor, file_name_of, normalize_path, relative_segments};
