use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppResult;

pub const DETECTED_VARIABLE: &str = "DIFF_DETECTED";
pub const DETECTED_OUTPUT: &str = "diff_detected";

/// Publishes the match outcome to the surrounding workflow through the
/// `GITHUB_ENV` and `GITHUB_OUTPUT` command files.
#[derive(Debug, Clone, Default)]
pub struct ActionsEnvironment {
    env_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl ActionsEnvironment {
    pub fn new(env_file: Option<PathBuf>, output_file: Option<PathBuf>) -> Self {
        Self {
            env_file,
            output_file,
        }
    }

    pub fn from_env() -> Self {
        let file_var = |name: &str| {
            env::var_os(name)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        Self::new(file_var("GITHUB_ENV"), file_var("GITHUB_OUTPUT"))
    }

    pub fn export_detected(&self, detected: bool) -> AppResult<()> {
        if let Some(path) = &self.env_file {
            append_line(path, &format!("{DETECTED_VARIABLE}={detected}"))?;
        }
        if let Some(path) = &self.output_file {
            append_line(path, &format!("{DETECTED_OUTPUT}={detected}"))?;
        }
        Ok(())
    }

    /// Workflow command that marks the run as failed in the job log.
    pub fn error_annotation(message: &str) -> String {
        let escaped = message
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");
        format!("::error::{escaped}")
    }
}

fn append_line(path: &Path, line: &str) -> AppResult<()> {
    debug!(path = %path.display(), line, "exporting");
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}
