//! Target planning.
//!
//! Maps discovered [`SourceItem`](crate::job::SourceItem)s to
//! [`Task`](crate::job::Task)s with unique output paths. Planning never
//! creates files or directories; it only probes the filesystem to avoid
//! colliding with documents that already exist.
//!
//! # Naming policy
//!
//! Every generated target gets a short random code appended to its stem
//! (`report.md` → `report_aZ3k9Q.docx`). A candidate that clashes with a
//! target assigned earlier in the same pass, or with a file already on
//! disk, is dropped and a new code is drawn. The code source is a
//! [`CodeGenerator`] so tests can make planning deterministic.
//!
//! The one exception is a single input combined with an `--output` that
//! names a file with the target extension: that path is used verbatim,
//! even if it already exists.

mod naming;
mod targets;

pub use naming::{CodeGenerator, RandomCodeGenerator, CODE_ALPHABET, CODE_LEN};
pub use targets::{plan_targets, Plan, TargetPlanner};
