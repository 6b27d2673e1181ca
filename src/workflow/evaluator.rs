use tracing::info;

use crate::context::AppContext;
use crate::domain::rule::Rule;
use crate::error::AppResult;
use crate::workflow::diff_source::get_diff;
use crate::workflow::precondition::satisfies_must_include;
use crate::workflow::query::build_options;

/// Does the rule see any change since the merge base with `base_ref`?
///
/// Requires a non-empty diff and, when declared, an existing `must_include`
/// path. Diff failures are returned as-is.
pub async fn rule_matches_change(ctx: &AppContext, rule: &Rule, base_ref: &str) -> AppResult<bool> {
    let options = build_options(rule, &ctx.config.workspace_root);
    let diff = get_diff(ctx, base_ref, &options).await?;
    info!(changed = diff.changed, options = %options.join(" "), "diff evaluated");

    if diff.changed == 0 {
        return Ok(false);
    }
    info!(files = %diff.file_names().join(" "), "diff results");

    Ok(satisfies_must_include(ctx, rule).await)
}
