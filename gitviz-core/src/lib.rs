//! Commit record model for the graph layout engine
//!
//! This crate owns the wire format supplied by the commit source, the
//! canonical ref-label parser, and the content fingerprint that drives
//! layout recomputation.

pub mod fingerprint;
pub mod record;
pub mod refs;
pub mod source;

pub use fingerprint::snapshot_key;
pub use record::{CommitRecord, ParentList, RawCommit};
pub use refs::{local_branch_names, parse_ref_field, RefKind, RefLabel};
pub use source::{records_from_reader, records_from_str, IngestError};
