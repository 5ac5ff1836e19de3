//! Event selection predicates.
//!
//! Every predicate maps an [`EventBatch`](teff_nano::EventBatch) to a boolean
//! mask with one entry per event. Masks combine through the explicit
//! reductions in [`mask`]; the physics cuts live in [`cuts`], and
//! [`registry`] resolves a run configuration into named, evaluatable
//! selections.

pub mod cuts;
pub mod mask;
pub mod registry;

pub use mask::{reduce_and, reduce_or};
pub use registry::{Selection, build_registry};
