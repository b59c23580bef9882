//! Configuration section definitions.
//!
//! Each module corresponds to a section in `dirmirror.toml`:
//!
//! | Module   | TOML Section | Purpose                             |
//! |----------|--------------|-------------------------------------|
//! | `serve`  | `[serve]`    | Snapshot websocket server           |
//! | `watch`  | `[watch]`    | Filesystem event coalescing         |
//! | `mirror` | `[mirror]`   | Splice behavior                     |

mod mirror;
mod serve;
mod watch;

pub use mirror::MirrorSectionConfig;
pub use serve::ServeConfig;
pub use watch::WatchConfig;
