use tracing::info;

use crate::config::anchor_path;
use crate::context::AppContext;
use crate::domain::rule::Rule;

/// True when the rule declares no `must_include`, or when at least one of the
/// listed paths exists in the working tree right now.
pub async fn satisfies_must_include(ctx: &AppContext, rule: &Rule) -> bool {
    let Some(paths) = rule.must_include() else {
        return true;
    };

    for path in paths {
        let full_path = anchor_path(&ctx.config.workspace_root, path);
        if ctx.filesystem.exists(&full_path).await {
            info!(path = %path, "must_include path exists");
            return true;
        }
    }

    info!(paths = %paths.join(" "), "none of the must_include paths exist");
    false
}
