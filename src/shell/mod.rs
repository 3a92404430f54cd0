//! Shell dialect detection and working-directory probing.
//!
//! Both components talk to the host only through a
//! [`RemoteExecutor`](crate::remote::RemoteExecutor) and never fail: an
//! inconclusive answer falls back to a dialect or a root directory.

mod dialect;
mod workdir;

pub use dialect::{ShellDialect, detect_dialect};
pub use workdir::resolve_working_directory;
