use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::rule::Rule;
use crate::error::AppResult;
use crate::manifest::load_rules;
use crate::workflow::diff_source::fetch_branches;
use crate::workflow::evaluator::rule_matches_change;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectOutcome {
    /// Index of the first rule that matched, in manifest order.
    pub matched_rule: Option<usize>,
    pub rules_evaluated: usize,
}

impl DetectOutcome {
    pub fn detected(&self) -> bool {
        self.matched_rule.is_some()
    }
}

/// Evaluates rules in order and stops at the first match.
pub async fn run_rules(ctx: &AppContext, rules: &[Rule]) -> AppResult<DetectOutcome> {
    if rules.is_empty() {
        warn!("manifest declares no rules");
    }

    let base_ref = ctx.config.base_ref.as_str();
    for (index, rule) in rules.iter().enumerate() {
        if rule_matches_change(ctx, rule, base_ref).await? {
            info!(rule = index, "git diff rule detected changes");
            return Ok(DetectOutcome {
                matched_rule: Some(index),
                rules_evaluated: index + 1,
            });
        }
    }

    info!("no changes detected");
    Ok(DetectOutcome {
        matched_rule: None,
        rules_evaluated: rules.len(),
    })
}

/// Full detection pass: fetch the base branch, load the manifest, run rules.
pub async fn detect_changes(ctx: &AppContext) -> AppResult<DetectOutcome> {
    if ctx.config.skip_fetch {
        info!("skipping fetch of base branch");
    } else {
        fetch_branches(ctx, &ctx.config.base_ref).await?;
    }

    let rules = load_rules(&ctx.config.config_file)?;
    run_rules(ctx, &rules).await
}
