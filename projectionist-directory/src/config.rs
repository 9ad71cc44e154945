//! Registry file configuration.
//!
//! The `RegistryConfig` trait names the marker file that declares a registry
//! in a directory, so tools embedding the lookup can use their own file name.

/// Configuration trait for registry discovery.
///
/// # Example
///
/// ```rust
/// use projectionist_directory::RegistryConfig;
///
/// pub struct MyToolConfig;
///
/// impl RegistryConfig for MyToolConfig {
///     const FILE_NAME: &'static str = ".mytool-projections.yaml";
/// }
/// ```
pub trait RegistryConfig: Send + Sync {
    /// The registry file looked for in every ancestor directory.
    const FILE_NAME: &'static str;
}

/// Configuration for `.projections.json` registries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionsConfig;

impl RegistryConfig for ProjectionsConfig {
    const FILE_NAME: &'static str = ".projections.json";
}
