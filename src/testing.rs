//! Test doubles for the collaborator services.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::diff::{DiffResult, FileChange};
use crate::error::{AppError, AppResult};
use crate::services::{FileSystemService, VersionControlService};

pub const WORKSPACE: &str = "/repo";
pub const BASE_REF: &str = "main";

/// Replays queued diff responses, then keeps answering with `default`.
#[derive(Default)]
pub struct FakeVersionControl {
    default: DiffResult,
    queued: Mutex<VecDeque<Result<DiffResult, String>>>,
    fetch_error: Option<String>,
    diff_calls: Mutex<Vec<Vec<String>>>,
    fetch_calls: Mutex<Vec<Vec<String>>>,
}

impl FakeVersionControl {
    pub fn returning(default: DiffResult) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    pub fn then_fail(self, message: &str) -> Self {
        self.queued
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn then_return(self, diff: DiffResult) -> Self {
        self.queued.lock().unwrap().push_back(Ok(diff));
        self
    }

    pub fn failing_fetch(mut self, message: &str) -> Self {
        self.fetch_error = Some(message.to_string());
        self
    }

    pub fn diff_calls(&self) -> Vec<Vec<String>> {
        self.diff_calls.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> Vec<Vec<String>> {
        self.fetch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VersionControlService for FakeVersionControl {
    async fn fetch(&self, options: &[String]) -> AppResult<()> {
        self.fetch_calls.lock().unwrap().push(options.to_vec());
        match &self.fetch_error {
            Some(message) => Err(AppError::Fetch(message.clone())),
            None => Ok(()),
        }
    }

    async fn diff_summary(&self, options: &[String]) -> AppResult<DiffResult> {
        self.diff_calls.lock().unwrap().push(options.to_vec());
        match self.queued.lock().unwrap().pop_front() {
            Some(Ok(diff)) => Ok(diff),
            Some(Err(message)) => Err(AppError::VersionControl(message)),
            None => Ok(self.default.clone()),
        }
    }
}

/// A filesystem where exactly the listed paths exist.
#[derive(Default)]
pub struct FakeFileSystem {
    existing: HashSet<PathBuf>,
    checks: Mutex<Vec<PathBuf>>,
}

impl FakeFileSystem {
    pub fn with_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            existing: paths
                .into_iter()
                .map(|path| Path::new(WORKSPACE).join(path))
                .collect(),
            checks: Mutex::new(Vec::new()),
        }
    }

    pub fn checks(&self) -> Vec<PathBuf> {
        self.checks.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSystemService for FakeFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        self.checks.lock().unwrap().push(path.to_path_buf());
        self.existing.contains(path)
    }
}

pub fn config() -> AppConfig {
    AppConfig::new(PathBuf::from(WORKSPACE), Path::new("rules.yml"), BASE_REF).unwrap()
}

pub fn context(vcs: Arc<FakeVersionControl>, fs: Arc<FakeFileSystem>) -> AppContext {
    AppContext::new(config(), vcs, fs)
}

pub fn changed(files: &[&str]) -> DiffResult {
    DiffResult::from_files(
        files
            .iter()
            .map(|file| FileChange::text(*file, 1, 0))
            .collect(),
    )
}
