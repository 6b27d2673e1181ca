use async_trait::async_trait;

use crate::domain::diff::DiffResult;
use crate::error::AppResult;

/// How much history a fetch of the base branch retrieves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDepth {
    Shallow(u32),
    Full,
}

impl FetchDepth {
    pub const DEFAULT: u32 = 100;

    /// Zero means no limit.
    pub fn from_commits(commits: u32) -> Self {
        match commits {
            0 => FetchDepth::Full,
            n => FetchDepth::Shallow(n),
        }
    }

    pub fn as_option(&self) -> Option<String> {
        match self {
            FetchDepth::Shallow(depth) => Some(format!("--depth={depth}")),
            FetchDepth::Full => None,
        }
    }
}

impl Default for FetchDepth {
    fn default() -> Self {
        FetchDepth::Shallow(Self::DEFAULT)
    }
}

#[async_trait]
pub trait VersionControlService: Send + Sync {
    async fn fetch(&self, options: &[String]) -> AppResult<()>;
    async fn diff_summary(&self, options: &[String]) -> AppResult<DiffResult>;
}
