//! Projection lookups: find the values a hierarchy of per-directory
//! registries declares for a file.
//!
//! A registry (a *projection*) maps glob-like patterns to properties. Property
//! values are templates whose `{...}` placeholders expand from the text the
//! pattern captured, which is how a registry derives the path of a related
//! file, a test, a header, or any other naming convention.
//!
//! # Overview
//!
//! - [`pattern`] - pattern normalization, compilation and matching
//! - [`specificity`] - ordering of patterns and roots, most specific first
//! - [`placeholder`] - `{...}` expansion through [`transforms`]
//! - [`query`] - the staged lookup pipeline
//!
//! # Example
//!
//! ```
//! use projectionist::{props, query_file, Projection, Projections};
//!
//! let projections = Projections::new().with(
//!     "/work/app",
//!     Projection::new()
//!         .with("src/*.rs", props([("alternate", "tests/{}_test.rs")]))
//!         .with("tests/*_test.rs", props([("alternate", "src/{}.rs")])),
//! );
//!
//! let alternates = query_file("alternate", "/work/app/src/net/codec.rs", &projections)?;
//! assert_eq!(alternates, vec!["/work/app/tests/net/codec_test.rs"]);
//! # Ok::<(), projectionist::ProjectionError>(())
//! ```

pub mod error;
pub mod paths;
pub mod pattern;
pub mod placeholder;
pub mod query;
pub mod specificity;
pub mod transforms;
mod types;

pub use error::{PlaceholderError, ProjectionError, Result};
pub use pattern::{matches, normalize, CompiledPattern};
pub use placeholder::{expand_all, expand_one};
pub use query::{query, query_file, query_file_rec, query_raw, query_scalar};
pub use types::{props, Projection, Projections, Props, QueryContext, RawResult};
