//! Loading the dataset from a directory of YAML files.
//!
//! Every `*.yaml` file below the data directory is parsed and merged into
//! one dataset. Files are visited in path order and later files take
//! precedence, so `series/` can be split over several files and `events`
//! lists from different files are concatenated.

use std::fs;
use std::path::{Path, PathBuf};

use ftwhub_core::{Map, Value, merge};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Errors that can occur while loading data files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read data directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: top-level document must be a mapping, found {found}", path.display())]
    NotAMapping { path: PathBuf, found: &'static str },
}

/// Lists the `*.yaml` files below `dir`, sorted by path.
pub fn collect_data_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "yaml")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Parses one data file. Returns `None` for files without content.
pub fn load_data_file(path: &Path) -> Result<Option<Map>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = Value::from_yaml_str(&text).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Null => Ok(None),
        Value::Mapping(map) => Ok(Some(map)),
        other => Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
            found: other.type_name(),
        }),
    }
}

/// Loads and merges every data file below `dir` into one dataset.
pub fn load_data_dir(dir: &Path) -> Result<Map, LoadError> {
    let files = collect_data_files(dir)?;
    let mut dataset = Map::new();
    let mut loaded = 0;

    for path in &files {
        match load_data_file(path)? {
            Some(data) => {
                debug!(path = %path.display(), keys = data.len(), "Merging data file");
                dataset = merge(&[&dataset, &data]);
                loaded += 1;
            }
            None => debug!(path = %path.display(), "Skipping empty data file"),
        }
    }

    info!(dir = %dir.display(), files = loaded, "Loaded data directory");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    mod collect {
        use super::*;

        #[test]
        fn finds_yaml_files_recursively_in_path_order() {
            let dir = TempDir::new().unwrap();
            write(&dir, "b.yaml", "");
            write(&dir, "a/z.yaml", "");
            write(&dir, "a/y.yaml", "");
            write(&dir, "notes.txt", "");
            write(&dir, "c.yml", "");

            let files: Vec<PathBuf> = collect_data_files(dir.path())
                .unwrap()
                .into_iter()
                .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
                .collect();
            assert_eq!(
                files,
                vec![
                    PathBuf::from("a/y.yaml"),
                    PathBuf::from("a/z.yaml"),
                    PathBuf::from("b.yaml"),
                ]
            );
        }

        #[test]
        fn missing_directory_is_an_error() {
            let dir = TempDir::new().unwrap();
            let err = collect_data_files(&dir.path().join("nope")).unwrap_err();
            assert!(matches!(err, LoadError::Walk { .. }));
        }
    }

    mod load {
        use super::*;

        #[test]
        fn merges_files_with_later_files_winning() {
            let dir = TempDir::new().unwrap();
            write(
                &dir,
                "1-series.yaml",
                "series:\n  abend:\n    description: Offener Tanzabend\n    social: true\n",
            );
            write(
                &dir,
                "2-events.yaml",
                "events:\n  - {title: A, start: 2024-05-03}\nseries:\n  abend:\n    social: false\n",
            );
            write(&dir, "3-more.yaml", "events:\n  - {title: B, start: 2024-05-10}\n");

            let dataset = load_data_dir(dir.path()).unwrap();
            let events = dataset["events"].as_sequence().unwrap();
            assert_eq!(events.len(), 2);

            let abend = dataset["series"].as_mapping().unwrap()["abend"]
                .as_mapping()
                .unwrap();
            assert_eq!(abend["description"], Value::from("Offener Tanzabend"));
            assert_eq!(abend["social"], Value::Bool(false));
        }

        #[test]
        fn empty_files_are_skipped() {
            let dir = TempDir::new().unwrap();
            write(&dir, "empty.yaml", "");
            write(&dir, "comment.yaml", "# nothing here\n");
            assert!(load_data_dir(dir.path()).unwrap().is_empty());
        }

        #[test]
        fn empty_directory_yields_empty_dataset() {
            let dir = TempDir::new().unwrap();
            assert!(load_data_dir(dir.path()).unwrap().is_empty());
        }

        #[test]
        fn syntax_errors_name_the_file() {
            let dir = TempDir::new().unwrap();
            write(&dir, "broken.yaml", "events: [unclosed\n");
            let err = load_data_dir(dir.path()).unwrap_err();
            assert!(matches!(err, LoadError::Yaml { .. }));
            assert!(err.to_string().contains("broken.yaml"));
        }

        #[test]
        fn top_level_sequence_is_rejected() {
            let dir = TempDir::new().unwrap();
            write(&dir, "list.yaml", "- a\n- b\n");
            let err = load_data_dir(dir.path()).unwrap_err();
            assert!(matches!(err, LoadError::NotAMapping { found: "sequence", .. }));
        }
    }
}
