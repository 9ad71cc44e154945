//! Execution of the query subcommands.

use crate::cli::{Commands, OutputFormat, QueryArgs};
use anyhow::{Context, Result};
use projectionist::transforms::TRANSFORM_NAMES;
use projectionist::{paths, Projections};
use projectionist_directory::{ProjectionLoader, ProjectionsConfig};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An expanded value together with the root that declared it.
#[derive(Debug, Serialize)]
struct RootedValue {
    root: String,
    value: String,
}

pub fn run(
    command: Commands,
    from: Option<&Path>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let loader = ProjectionLoader::<ProjectionsConfig>::new();

    match command {
        Commands::Raw(args) => {
            let (file, projections) = prepare(&loader, &args, from)?;
            let results = projectionist::query_raw(&args.key, &file, &projections)?;
            match format {
                OutputFormat::Json => write_json(out, &results),
                OutputFormat::Text => {
                    for result in &results {
                        writeln!(out, "{}", result.value)?;
                    }
                    Ok(())
                }
            }
        }
        Commands::Query(args) => {
            let (file, projections) = prepare(&loader, &args, from)?;
            let pairs: Vec<RootedValue> = projectionist::query(&args.key, &file, &projections)?
                .into_iter()
                .map(|(root, value)| RootedValue { root, value })
                .collect();
            match format {
                OutputFormat::Json => write_json(out, &pairs),
                OutputFormat::Text => {
                    for pair in &pairs {
                        writeln!(out, "{}\t{}", pair.root, pair.value)?;
                    }
                    Ok(())
                }
            }
        }
        Commands::Scalar(args) => {
            let (file, projections) = prepare(&loader, &args, from)?;
            let values = projectionist::query_scalar(&args.key, &file, &projections)?;
            write_lines(out, format, &values)
        }
        Commands::File(args) => {
            let (file, projections) = prepare(&loader, &args, from)?;
            let files = projectionist::query_file(&args.key, &file, &projections)?;
            write_lines(out, format, &files)
        }
        Commands::Rec { query, max_depth } => {
            let (file, projections) = prepare(&loader, &query, from)?;
            let files = projectionist::query_file_rec(&query.key, &file, max_depth, &projections)?;
            write_lines(out, format, &files)
        }
        Commands::Detect { path } => {
            let registries: Vec<String> = loader
                .detect(&path)
                .with_context(|| format!("Failed to detect registries for {}", path.display()))?
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            write_lines(out, format, &registries)
        }
        Commands::Transforms => {
            let names: Vec<String> = TRANSFORM_NAMES.iter().map(|n| n.to_string()).collect();
            write_lines(out, format, &names)
        }
    }
}

/// Normalize the queried file and load the registries applying to it.
fn prepare(
    loader: &ProjectionLoader<ProjectionsConfig>,
    args: &QueryArgs,
    from: Option<&Path>,
) -> Result<(String, Projections)> {
    let file = absolute(&args.file)?;
    let start = from.unwrap_or(file.as_path());
    let projections = loader
        .load_for(start)
        .with_context(|| format!("Failed to load registries for {}", start.display()))?;

    let file = paths::clean(&file.to_string_lossy());
    debug!(
        "Querying '{}' for {} against {} registries",
        args.key,
        file,
        projections.len()
    );
    Ok((file, projections))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

fn write_lines(out: &mut impl Write, format: OutputFormat, lines: &[String]) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, lines),
        OutputFormat::Text => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(
            temp.path().join(".projections.json"),
            r#"{"src/*.rs": {"alternate": "tests/{}_test.rs", "class": "{camelcase|capitalize}"}}"#,
        )
        .unwrap();
        fs::write(temp.path().join("src/line_item.rs"), "").unwrap();
        temp
    }

    fn args(key: &str, file: PathBuf) -> QueryArgs {
        QueryArgs {
            key: key.to_string(),
            file,
        }
    }

    fn run_to_string(command: Commands, from: Option<&Path>, format: OutputFormat) -> String {
        let mut out = Vec::new();
        run(command, from, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_scalar_text() {
        let temp = fixture();
        let file = temp.path().join("src/line_item.rs");
        let output = run_to_string(
            Commands::Scalar(args("class", file)),
            None,
            OutputFormat::Text,
        );
        assert_eq!(output, "LineItem\n");
    }

    #[test]
    fn test_query_json_carries_root() {
        let temp = fixture();
        let file = temp.path().join("src/line_item.rs");
        let output = run_to_string(
            Commands::Query(args("alternate", file)),
            None,
            OutputFormat::Json,
        );
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let root = paths::clean(&temp.path().to_string_lossy());
        assert_eq!(parsed[0]["root"], root.as_str());
        assert_eq!(parsed[0]["value"], "tests/line_item_test.rs");
    }

    #[test]
    fn test_from_directory_for_missing_file() {
        let temp = fixture();
        let file = temp.path().join("src/not_written_yet.rs");
        let output = run_to_string(
            Commands::File(args("alternate", file)),
            Some(temp.path()),
            OutputFormat::Text,
        );
        let expected = paths::clean(
            &temp
                .path()
                .join("tests/not_written_yet_test.rs")
                .to_string_lossy(),
        );
        assert_eq!(output, format!("{expected}\n"));
    }

    #[test]
    fn test_transforms_lists_every_name() {
        let output = run_to_string(Commands::Transforms, None, OutputFormat::Text);
        let names: Vec<&str> = output.lines().collect();
        assert_eq!(names, TRANSFORM_NAMES);
        assert!(names.contains(&"camelcase"));
    }

    #[test]
    fn test_missing_file_without_from_fails() {
        let temp = fixture();
        let mut out = Vec::new();
        let result = run(
            Commands::File(args("alternate", temp.path().join("src/missing.rs"))),
            None,
            OutputFormat::Text,
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
