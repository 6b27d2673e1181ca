use tracing::{error, info};

use crate::context::AppContext;
use crate::domain::diff::DiffResult;
use crate::error::AppResult;

/// Updates the local copy of `<remote>/<base_ref>`.
pub async fn fetch_branches(ctx: &AppContext, base_ref: &str) -> AppResult<()> {
    let remote = &ctx.config.remote;

    let mut options = vec!["--no-tags".to_string(), "--prune".to_string()];
    options.extend(ctx.config.fetch_depth.as_option());
    options.push(remote.clone());
    options.push(format!(
        "+refs/heads/{base_ref}:refs/remotes/{remote}/{base_ref}"
    ));

    info!(options = %options.join(" "), "running git fetch");
    ctx.version_control.fetch(&options).await
}

/// Summarizes what changed since the merge base with `<remote>/<base_ref>`.
///
/// A failed query is retried once with the same arguments; a second failure
/// is returned to the caller.
pub async fn get_diff(
    ctx: &AppContext,
    base_ref: &str,
    extra_options: &[String],
) -> AppResult<DiffResult> {
    let mut options = vec![
        "--no-color".to_string(),
        format!("{}/{base_ref}...", ctx.config.remote),
    ];
    options.extend_from_slice(extra_options);
    info!(options = %options.join(" "), "git diff options");

    match ctx.version_control.diff_summary(&options).await {
        Ok(diff) => {
            log_files(&diff);
            return Ok(diff);
        }
        Err(err) => error!("git diff summary failed, retrying: {err}"),
    }

    let diff = ctx.version_control.diff_summary(&options).await?;
    log_files(&diff);
    Ok(diff)
}

fn log_files(diff: &DiffResult) {
    info!(files = %diff.file_names().join(" "), "git diffed files");
}
