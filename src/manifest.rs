use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use crate::domain::rule::{Manifest, Rule};
use crate::error::{AppError, AppResult};

/// Reads the YAML rules manifest at `path`.
pub fn load_rules(path: &Path) -> AppResult<Vec<Rule>> {
    info!(path = %path.display(), "parsing rules in yaml manifest");

    let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => {
            AppError::Configuration(format!("manifest {} not found", path.display()))
        }
        _ => AppError::Io(err),
    })?;

    parse_rules(&contents, path)
}

fn parse_rules(contents: &str, path: &Path) -> AppResult<Vec<Rule>> {
    if contents.trim().is_empty() {
        return Err(AppError::Configuration(format!(
            "manifest {} is empty; expected a `rules` sequence",
            path.display()
        )));
    }

    let manifest: Manifest = serde_yaml::from_str(contents).map_err(|source| AppError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(manifest.rules)
}
