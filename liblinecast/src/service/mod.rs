//! Service layer for Linecast
//!
//! Business logic shared by the binaries:
//!
//! - `posting`: one daily run (load, select, build, broadcast)
//! - `validation`: content file checks used by `line-check`

pub mod posting;
pub mod validation;

pub use posting::{prepare, PostOutcome, PostingService, PreparedPost};
pub use validation::{ItemIssue, ValidationReport};
