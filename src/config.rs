use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::services::FetchDepth;

pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workspace_root: PathBuf,
    pub config_file: PathBuf,
    pub base_ref: String,
    pub remote: String,
    pub fetch_depth: FetchDepth,
    pub skip_fetch: bool,
}

impl AppConfig {
    pub fn new(workspace_root: PathBuf, config_file: &Path, base_ref: &str) -> AppResult<Self> {
        let base_ref = base_ref.trim();
        if base_ref.is_empty() {
            return Err(AppError::Configuration(
                "base ref must not be empty".to_string(),
            ));
        }

        Ok(Self {
            config_file: manifest_path(&workspace_root, config_file)?,
            workspace_root,
            base_ref: base_ref.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            fetch_depth: FetchDepth::default(),
            skip_fetch: false,
        })
    }

    pub fn with_remote(mut self, remote: &str) -> Self {
        let remote = remote.trim();
        if !remote.is_empty() {
            self.remote = remote.to_string();
        }
        self
    }

    pub fn with_fetch_depth(mut self, depth: FetchDepth) -> Self {
        self.fetch_depth = depth;
        self
    }

    pub fn with_skip_fetch(mut self, skip_fetch: bool) -> Self {
        self.skip_fetch = skip_fetch;
        self
    }
}

/// Picks the repository root: an explicit value (usually `GITHUB_WORKSPACE`),
/// then `PWD`, then the process working directory.
pub fn workspace_root(explicit: Option<PathBuf>) -> AppResult<PathBuf> {
    explicit
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| env::var_os("PWD").filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| env::current_dir().ok())
        .ok_or_else(|| {
            AppError::Configuration("either GITHUB_WORKSPACE or PWD must be set".to_string())
        })
}

/// Resolves the manifest location against the workspace root.
pub fn manifest_path(workspace_root: &Path, config_file: &Path) -> AppResult<PathBuf> {
    if config_file.as_os_str().is_empty() {
        return Err(AppError::Configuration("config file not set".to_string()));
    }
    Ok(workspace_root.join(config_file))
}

/// Joins a manifest path onto the workspace root. Leading separators are
/// dropped so that `/src/` still means `<root>/src/`.
pub fn anchor_path(workspace_root: &Path, path: &str) -> PathBuf {
    workspace_root.join(path.trim_start_matches('/'))
}
