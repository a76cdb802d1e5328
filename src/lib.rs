//! Build-time import patcher for the showcqt web component.
//!
//! Rewrites the pinned jsDelivr import inside `showcqt-element.mjs` to the
//! bare module specifier `showcqt`, so the bundler resolves the dependency
//! locally instead of loading it from the CDN at runtime.
//!
//! # Architecture
//!
//! The whole tool compiles down to a single primitive: [`Patch`], a
//! first-match literal substitution against one file. There is no pattern
//! syntax, no multi-file walking, and no configuration; the target path and
//! both literals are fixed by the binary.
//!
//! # Safety
//!
//! - UTF-8 validation before any transform
//! - Only the first occurrence (lowest byte offset) is replaced
//! - Atomic file writes (tempfile + fsync + rename)
//! - Idempotent: a second run finds nothing to replace and is a no-op
//!
//! # Example
//!
//! ```no_run
//! use showcqt_patcher::{Patch, PatchOutcome};
//!
//! let patch = Patch::new(
//!     "showcqt-element.mjs",
//!     "https://cdn.jsdelivr.net/npm/showcqt@1.2.1/showcqt.mjs",
//!     "showcqt",
//! );
//!
//! match patch.apply() {
//!     Ok(PatchOutcome::Applied { byte_offset, .. }) => {
//!         println!("import rewritten at byte {byte_offset}");
//!     }
//!     Ok(PatchOutcome::Unchanged { .. }) => println!("nothing to do"),
//!     Err(e) => eprintln!("patch failed: {e}"),
//! }
//! ```

pub mod patch;

// Re-exports
pub use patch::{Patch, PatchError, PatchOutcome, PatchStatus};
