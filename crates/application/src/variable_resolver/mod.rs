//! Value resolution module
//!
//! Resolves `${key}` references and `$var*` directives inside a record.
//!
//! # Usage
//!
//! ```
//! use varflat_application::variable_resolver::{UnresolvedKeys, resolve_all_values};
//! use varflat_domain::{Dataset, Record};
//!
//! let dataset: Dataset = vec![Record::from([("isbn", "123"), ("name", "Clara")])].into();
//!
//! let mut record = Record::from([
//!     ("isbn", "123"),
//!     ("author", "$varbookref isbn == ${isbn} !! name"),
//!     ("line", "${author} (${isbn})"),
//! ]);
//!
//! let mut unresolved = UnresolvedKeys::new();
//! resolve_all_values(&mut record, Some(&mut unresolved), &dataset).unwrap();
//!
//! assert_eq!(record.get("line"), Some("Clara (123)"));
//! assert!(unresolved.is_empty());
//! ```

pub mod condition;
pub mod engine;
pub mod evaluator;
pub mod matcher;
pub mod parser;

pub use condition::{evaluate_condition, parse_condition};
pub use engine::{RecordResolution, RecordResolver, UnresolvedKeys, resolve_all_values};
pub use evaluator::{Evaluator, parse_directive};
pub use matcher::{RecordMatcher, parse_constraints};
pub use parser::{KeyReference, extract_reference_names, has_references, parse_references};
