//! Columnar access to NanoAOD-style event trees.
//!
//! The unit of work is one file's event tree, materialized as an
//! [`EventBatch`]: per-event scalars (trigger flags, object counts) plus
//! per-object jagged columns ([`JaggedCol`]). Batches are built either from a
//! ROOT file ([`reader::load_batch`]) or directly from columns in tests.

pub mod batch;
pub mod jagged;
pub mod reader;

pub use batch::{BranchRequest, EventBatch};
pub use jagged::JaggedCol;
