use std::path::PathBuf;
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::diff::{DiffResult, FileChange};
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn git(&self, args: &[String]) -> AppResult<Output> {
        debug!(cwd = %self.workspace_root.display(), "git {}", args.join(" "));
        let output = Command::new("git")
            .current_dir(&self.workspace_root)
            .args(args)
            .output()
            .await?;
        Ok(output)
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn fetch(&self, options: &[String]) -> AppResult<()> {
        let mut args = vec!["fetch".to_string()];
        args.extend_from_slice(options);

        let output = self.git(&args).await?;
        if !output.status.success() {
            return Err(AppError::Fetch(failure_message(&output)));
        }
        Ok(())
    }

    async fn diff_summary(&self, options: &[String]) -> AppResult<DiffResult> {
        let mut args = vec!["diff".to_string(), "--numstat".to_string(), "-z".to_string()];
        args.extend_from_slice(options);

        let output = self.git(&args).await?;
        if !output.status.success() {
            return Err(AppError::VersionControl(failure_message(&output)));
        }
        parse_numstat(&String::from_utf8_lossy(&output.stdout))
    }
}

fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        stderr.to_string()
    }
}

/// Parses `git diff --numstat -z` output into a summary.
///
/// Each record is `added<TAB>deleted<TAB>path<NUL>`. Renames leave the path
/// field empty and follow it with `source<NUL>destination<NUL>`.
pub fn parse_numstat(output: &str) -> AppResult<DiffResult> {
    let mut fields = output.split('\0');
    let mut files = Vec::new();

    while let Some(record) = fields.next() {
        let record = record.trim_start_matches('\n');
        if record.is_empty() {
            continue;
        }

        let mut stats = record.splitn(3, '\t');
        let (Some(added), Some(removed), Some(path)) = (stats.next(), stats.next(), stats.next())
        else {
            return Err(AppError::VersionControl(format!(
                "unexpected diff summary record: {record}"
            )));
        };

        let (old_file, file) = if path.is_empty() {
            match (fields.next(), fields.next()) {
                (Some(source), Some(destination)) if !destination.is_empty() => {
                    (Some(source.to_string()), destination.to_string())
                }
                _ => {
                    return Err(AppError::VersionControl(format!(
                        "truncated rename in diff summary record: {record}"
                    )));
                }
            }
        } else {
            (None, path.to_string())
        };

        // Binary files report "-" for both counts.
        let binary = added == "-" && removed == "-";
        let (insertions, deletions) = if binary {
            (0, 0)
        } else {
            (parse_count(added, record)?, parse_count(removed, record)?)
        };

        files.push(FileChange {
            file,
            old_file,
            insertions,
            deletions,
            binary,
        });
    }

    Ok(DiffResult::from_files(files))
}

fn parse_count(value: &str, record: &str) -> AppResult<usize> {
    value.parse().map_err(|_| {
        AppError::VersionControl(format!("invalid line count '{value}' in: {record}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    #[test]
    fn parses_added_and_deleted_files() {
        let diff =
            parse_numstat("2\t0\tsrc/new-file.ts\u{0}0\t5\tsrc/dir/subdir/removed\u{0}").unwrap();
        assert_eq!(diff.changed, 2);
        assert_eq!(diff.insertions, 2);
        assert_eq!(diff.deletions, 5);
        assert_eq!(
            diff.file_names(),
            vec!["src/new-file.ts", "src/dir/subdir/removed"]
        );
    }

    #[test]
    fn empty_output_is_no_change() {
        let diff = parse_numstat("").unwrap();
        assert_eq!(diff, DiffResult::default());
    }

    #[test]
    fn binary_file_counts_as_changed() {
        let diff = parse_numstat("-\t-\tassets/logo.png\u{0}").unwrap();
        assert_eq!(diff.changed, 1);
        assert_eq!(diff.insertions + diff.deletions, 0);
        assert!(diff.files[0].binary);
    }

    #[test]
    fn rename_reports_destination_and_source() {
        let diff =
            parse_numstat("0\t0\t\u{0}src/old/lib.rs\u{0}src/new/lib.rs\u{0}1\t0\tREADME.md\u{0}")
                .unwrap();
        assert_eq!(diff.changed, 2);
        assert_eq!(diff.files[0].file, "src/new/lib.rs");
        assert_eq!(diff.files[0].old_file.as_deref(), Some("src/old/lib.rs"));
        assert_eq!(diff.files[1].file, "README.md");
        assert_eq!(diff.files[1].old_file, None);
    }

    #[test]
    fn keeps_special_characters_in_paths_verbatim() {
        let diff = parse_numstat("1\t0\tdocs/with\ttab \"quoted\".md\u{0}").unwrap();
        assert_eq!(diff.files[0].file, "docs/with\ttab \"quoted\".md");
    }

    #[test]
    fn rejects_malformed_records() {
        assert!(matches!(
            parse_numstat("garbage\u{0}"),
            Err(AppError::VersionControl(_))
        ));
        assert!(matches!(
            parse_numstat("x\t1\tsrc/a.rs\u{0}"),
            Err(AppError::VersionControl(_))
        ));
        assert!(matches!(
            parse_numstat("0\t0\t\u{0}src/only-source.rs\u{0}"),
            Err(AppError::VersionControl(_))
        ));
    }

    fn run_git(dir: &Path, args: &[&str]) {
        let output = std::process::Command::new("git")
            .current_dir(dir)
            .args([
                "-c",
                "user.name=Diff Rules",
                "-c",
                "user.email=diff-rules@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// An origin with one commit on `main`, and a clone with one more commit
    /// under `src/`.
    fn clone_with_local_commit(root: &Path) -> PathBuf {
        let origin = root.join("origin");
        fs::create_dir_all(&origin).unwrap();
        run_git(&origin, &["init", "--quiet"]);
        run_git(&origin, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        fs::write(origin.join("README.md"), "base\n").unwrap();
        run_git(&origin, &["add", "README.md"]);
        run_git(&origin, &["commit", "--quiet", "-m", "base"]);

        run_git(root, &["clone", "--quiet", "origin", "work"]);
        let work = root.join("work");
        fs::create_dir_all(work.join("src")).unwrap();
        fs::write(work.join("src/lib.rs"), "pub fn a() {}\n").unwrap();
        run_git(&work, &["add", "src/lib.rs"]);
        run_git(&work, &["commit", "--quiet", "-m", "add src"]);
        work
    }

    fn diff_options(base: &str, work: &Path, filter: &str) -> Vec<String> {
        vec![
            "--no-color".to_string(),
            format!("origin/{base}..."),
            "--".to_string(),
            work.join(filter).display().to_string(),
        ]
    }

    #[tokio::test]
    async fn fetches_and_diffs_a_real_repository() {
        let dir = tempfile::tempdir().unwrap();
        let work = clone_with_local_commit(dir.path());
        let git = GitCli::new(work.clone());

        git.fetch(&[
            "--no-tags".to_string(),
            "--prune".to_string(),
            "origin".to_string(),
            "+refs/heads/main:refs/remotes/origin/main".to_string(),
        ])
        .await
        .unwrap();

        let src = git.diff_summary(&diff_options("main", &work, "src/")).await.unwrap();
        assert_eq!(src.changed, 1);
        assert_eq!(src.insertions, 1);
        assert_eq!(src.file_names(), vec!["src/lib.rs"]);

        let dist = git.diff_summary(&diff_options("main", &work, "dist/")).await.unwrap();
        assert_eq!(dist, DiffResult::default());
    }

    #[tokio::test]
    async fn unknown_ref_is_version_control_error() {
        let dir = tempfile::tempdir().unwrap();
        let work = clone_with_local_commit(dir.path());
        let git = GitCli::new(work.clone());

        let err = git
            .diff_summary(&diff_options("no-such-branch", &work, "src/"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::VersionControl(_)));
    }

    #[tokio::test]
    async fn failed_fetch_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let work = clone_with_local_commit(dir.path());
        let git = GitCli::new(work);

        let err = git
            .fetch(&[
                "origin".to_string(),
                "+refs/heads/no-such-branch:refs/remotes/origin/no-such-branch".to_string(),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
    }
}
