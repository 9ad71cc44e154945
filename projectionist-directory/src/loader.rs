//! Loading registry files into [`Projections`].
//!
//! A registry file maps patterns to property maps:
//!
//! ```json
//! {
//!   "src/*.rs": { "alternate": "tests/{}_test.rs", "type": "source" },
//!   "tests/*_test.rs": { "alternate": "src/{}.rs", "type": "test" }
//! }
//! ```
//!
//! The registry's root is the directory holding the file. Property values
//! other than strings are skipped.

use crate::config::{ProjectionsConfig, RegistryConfig};
use crate::discovery::{absolute, detect};
use crate::error::{DirectoryError, Result};
use projectionist::{paths, Projection, Projections, Props};
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Maximum registry file size to load (10MB).
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// On-disk registry format, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl RegistryFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Loads registries declared with the marker file named by `C`.
///
/// # Example
///
/// ```no_run
/// use projectionist_directory::{ProjectionLoader, ProjectionsConfig};
///
/// let loader = ProjectionLoader::<ProjectionsConfig>::default();
/// let projections = loader.load_for("src/main.rs")?;
/// let tests = projectionist::query_file("alternate", "/work/app/src/main.rs", &projections)?;
/// for test in &tests {
///     println!("{test}");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProjectionLoader<C: RegistryConfig = ProjectionsConfig> {
    _phantom: PhantomData<C>,
}

impl<C: RegistryConfig> Default for ProjectionLoader<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RegistryConfig> ProjectionLoader<C> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    /// Registry files applying to `start`, nearest first.
    pub fn detect(&self, start: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        detect::<C>(start.as_ref())
    }

    /// Discover and load every registry applying to `start`.
    pub fn load_for(&self, start: impl AsRef<Path>) -> Result<Projections> {
        let files = self.detect(start)?;
        self.load_all(&files)
    }

    /// Load every registry file into one set.
    ///
    /// Files declaring the same root are merged; patterns from later files
    /// win.
    pub fn load_all(&self, files: &[PathBuf]) -> Result<Projections> {
        let mut projections = Projections::new();
        for file in files {
            let (root, projection) = self.load_file(file)?;
            projections.insert(&root, projection);
        }
        let patterns: usize = projections.iter().map(|(_, p)| p.len()).sum();
        debug!(
            "Loaded {} registries ({} patterns) from {} files",
            projections.len(),
            patterns,
            files.len()
        );
        Ok(projections)
    }

    /// Load one registry file, returning its root and its patterns.
    pub fn load_file(&self, path: &Path) -> Result<(String, Projection)> {
        let path = absolute(path)?;
        let Some(format) = RegistryFormat::from_path(&path) else {
            return Err(DirectoryError::UnsupportedFormat { path });
        };

        let metadata = std::fs::metadata(&path).map_err(|e| DirectoryError::file_read(&path, e))?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(DirectoryError::FileTooLarge {
                path,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| DirectoryError::file_read(&path, e))?;

        let projection = parse(&path, &content, format)?;
        let root = path
            .parent()
            .map(|dir| paths::clean(&dir.to_string_lossy()))
            .unwrap_or_else(|| "/".to_string());
        for (pattern, props) in projection.iter() {
            trace!("Pattern '{}' at {}: {:?}", pattern, root, props);
        }

        debug!(
            "Loaded registry {} ({} patterns) for root {}",
            path.display(),
            projection.len(),
            root
        );
        Ok((root, projection))
    }
}

/// Parse registry content in the given format.
pub fn parse(path: &Path, content: &str, format: RegistryFormat) -> Result<Projection> {
    let raw: HashMap<String, HashMap<String, Value>> = match format {
        RegistryFormat::Json => {
            serde_json::from_str(content).map_err(|e| DirectoryError::parse(path, e))?
        }
        RegistryFormat::Yaml => {
            serde_yaml_ng::from_str(content).map_err(|e| DirectoryError::parse(path, e))?
        }
    };

    Ok(raw
        .into_iter()
        .map(|(pattern, values)| {
            let props = string_props(path, &pattern, values);
            (pattern, props)
        })
        .collect())
}

fn string_props(path: &Path, pattern: &str, values: HashMap<String, Value>) -> Props {
    values
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            other => {
                warn!(
                    "Skipping non-string value for '{}' under '{}' in {}: {}",
                    key,
                    pattern,
                    path.display(),
                    other
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct YamlConfig;

    impl RegistryConfig for YamlConfig {
        const FILE_NAME: &'static str = ".projections.yaml";
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            RegistryFormat::from_path(Path::new(".projections.json")),
            Some(RegistryFormat::Json)
        );
        assert_eq!(
            RegistryFormat::from_path(Path::new("a/p.YML")),
            Some(RegistryFormat::Yaml)
        );
        assert_eq!(RegistryFormat::from_path(Path::new("p.toml")), None);
        assert_eq!(RegistryFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_parse_skips_non_string_values() {
        let projection = parse(
            Path::new("/x/.projections.json"),
            r#"{"*.c": {"alternate": "{}.h", "make": ["a", "b"], "n": 3}}"#,
            RegistryFormat::Json,
        )
        .unwrap();
        let props = projection.get("*.c").unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props["alternate"], "{}.h");
    }

    #[test]
    fn test_parse_yaml() {
        let projection = parse(
            Path::new("/x/.projections.yaml"),
            "\"src/*.rs\":\n  alternate: \"tests/{}.rs\"\n",
            RegistryFormat::Yaml,
        )
        .unwrap();
        assert_eq!(
            projection.get("src/*.rs").unwrap()["alternate"],
            "tests/{}.rs"
        );
    }

    #[test]
    fn test_parse_rejects_non_map() {
        let err = parse(
            Path::new("/x/.projections.json"),
            r#"["not", "a", "map"]"#,
            RegistryFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, DirectoryError::Parse { .. }));
        assert!(err.to_string().contains(".projections.json"));
    }

    #[test]
    fn test_load_file_root_is_parent_dir() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join(".projections.json");
        fs::write(&file, r#"{"*": {"k": "v"}}"#).unwrap();

        let (root, projection) = ProjectionLoader::<ProjectionsConfig>::new()
            .load_file(&file)
            .unwrap();
        assert_eq!(root, paths::clean(&temp.path().to_string_lossy()));
        assert_eq!(projection.get("*").unwrap()["k"], "v");
    }

    #[test]
    fn test_load_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = ProjectionLoader::<ProjectionsConfig>::new()
            .load_file(&temp.path().join(".projections.json"))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::FileRead { .. }));
    }

    #[test]
    fn test_load_for_with_custom_config() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sub")).unwrap();
        fs::write(
            temp.path().join(".projections.yaml"),
            "\"*\":\n  kind: outer\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("sub/.projections.yaml"),
            "\"*\":\n  kind: inner\n",
        )
        .unwrap();
        fs::write(temp.path().join("sub/file.txt"), "").unwrap();

        let loader = ProjectionLoader::<YamlConfig>::new();
        let files: Vec<PathBuf> = loader
            .detect(temp.path().join("sub/file.txt"))
            .unwrap()
            .into_iter()
            .filter(|p| p.starts_with(temp.path()))
            .collect();
        let projections = loader.load_all(&files).unwrap();

        let file = paths::clean(&temp.path().join("sub/file.txt").to_string_lossy());
        let kinds = projectionist::query_scalar("kind", &file, &projections).unwrap();
        assert_eq!(kinds, vec!["inner", "outer"]);
    }
}
