//! In-memory mirror of a directory tree.
//!
//! # Module Structure
//!
//! ```text
//! tree/
//! ├── node     # Directory / File
//! ├── scan     # filesystem -> fresh subtree
//! ├── splice   # install a subtree into the mirror
//! ├── store    # shared copy-on-write mirror
//! └── error    # ScanError / SpliceError
//! ```

mod error;
mod node;
mod scan;
mod splice;
mod store;

pub use error::{ScanError, SpliceError};
pub use node::{Directory, File};
pub use scan::scan;
pub use splice::{MissingChild, Spliced, splice};
pub use store::MirrorStore;
