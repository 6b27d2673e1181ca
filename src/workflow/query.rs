use std::path::Path;

use tracing::info;

use crate::config::anchor_path;
use crate::domain::rule::Rule;

/// Marks the end of revision arguments; everything after it is a path filter.
pub const PATH_SEPARATOR: &str = "--";

/// Builds the path-filter arguments for a diff query.
///
/// Paths are anchored at `workspace_root` so the query means the same thing
/// regardless of the directory git runs in. No paths means no filter.
pub fn build_options(rule: &Rule, workspace_root: &Path) -> Vec<String> {
    let full_paths = rule
        .paths
        .iter()
        .map(|path| anchor_path(workspace_root, path).display().to_string());

    let options: Vec<String> = if rule.paths.is_empty() {
        Vec::new()
    } else {
        std::iter::once(PATH_SEPARATOR.to_string())
            .chain(full_paths)
            .collect()
    };

    info!(options = %options.join(" "), "built diff options");
    options
}
