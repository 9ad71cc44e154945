//! Per-directory projection registries on disk.
//!
//! A directory declares a registry by holding a marker file (by default
//! `.projections.json`). The registries applying to a file are the ones found
//! in its directory and every ancestor; each one's root is the directory
//! holding it.
//!
//! # Overview
//!
//! - [`RegistryConfig`] - names the marker file
//! - [`detect`] - walks up from a path collecting marker files, nearest first
//! - [`ProjectionLoader`] - parses marker files into [`projectionist::Projections`]
//!
//! # Example
//!
//! ```no_run
//! use projectionist_directory::{ProjectionLoader, ProjectionsConfig};
//!
//! let loader = ProjectionLoader::<ProjectionsConfig>::new();
//! for registry in loader.detect("src/lib.rs")? {
//!     println!("{}", registry.display());
//! }
//!
//! let projections = loader.load_for("src/lib.rs")?;
//! println!("{} registries", projections.len());
//! # Ok::<(), projectionist_directory::DirectoryError>(())
//! ```

mod config;
mod discovery;
mod error;
mod loader;

pub use config::{ProjectionsConfig, RegistryConfig};
pub use discovery::detect;
pub use error::{DirectoryError, Result};
pub use loader::{parse, ProjectionLoader, RegistryFormat};
