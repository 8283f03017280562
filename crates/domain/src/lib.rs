//! Varflat Domain - Core record types
//!
//! This crate defines the data model for the varflat record resolver:
//! records, datasets, the directive language's types and its errors.
//! All types here are pure Rust with no I/O dependencies.

pub mod directive;
pub mod error;
pub mod settings;
pub mod store;

pub use directive::{
    BookRef, Comparison, Condition, Constraint, Directive, DirectiveKind, EqualityOperator,
};
pub use error::{ResolveError, ResolveResult};
pub use settings::{ResolveSettings, SnapshotPolicy};
pub use store::{Dataset, Record, ValueState, is_resolved};
