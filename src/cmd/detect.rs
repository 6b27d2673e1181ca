use tracing::info;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::actions::{ActionsEnvironment, DETECTED_VARIABLE};
use crate::workflow::runner::{DetectOutcome, detect_changes};

#[derive(Debug, Clone)]
pub struct DetectCommandArgs {
    pub exit_code: bool,
}

/// Process exit status when `--exit-code` is set and nothing matched.
pub const NO_MATCH_EXIT_CODE: i32 = 2;

pub async fn run(
    ctx: &AppContext,
    actions: &ActionsEnvironment,
    args: DetectCommandArgs,
) -> AppResult<i32> {
    let outcome = detect_changes(ctx).await?;
    info!(
        detected = outcome.detected(),
        rules_evaluated = outcome.rules_evaluated,
        "detection finished"
    );
    actions.export_detected(outcome.detected())?;
    println!("{DETECTED_VARIABLE}={}", outcome.detected());
    Ok(exit_status(&outcome, &args))
}

fn exit_status(outcome: &DetectOutcome, args: &DetectCommandArgs) -> i32 {
    if args.exit_code && !outcome.detected() {
        NO_MATCH_EXIT_CODE
    } else {
        0
    }
}
