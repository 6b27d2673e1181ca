use std::path::Path;

use crate::domain::rule::{Manifest, Rule};
use crate::error::{AppError, AppResult};
use crate::manifest::load_rules;

#[derive(Debug, Clone)]
pub struct ValidateCommandArgs {
    pub json: bool,
}

/// Loads the manifest without touching git and prints the parsed rules.
pub fn run(manifest_path: &Path, args: ValidateCommandArgs) -> AppResult<()> {
    let rules = load_rules(manifest_path)?;
    println!("{}", render(manifest_path, rules, &args)?);
    Ok(())
}

fn render(manifest_path: &Path, rules: Vec<Rule>, args: &ValidateCommandArgs) -> AppResult<String> {
    if args.json {
        return serde_json::to_string_pretty(&Manifest { rules })
            .map_err(|err| AppError::Configuration(format!("failed to render rules: {err}")));
    }

    let mut lines = vec![format!(
        "{}: {} rule(s)",
        manifest_path.display(),
        rules.len()
    )];
    for (index, rule) in rules.iter().enumerate() {
        let paths = if rule.paths.is_empty() {
            "<whole tree>".to_string()
        } else {
            rule.paths.join(", ")
        };
        lines.push(format!("  [{index}] paths: {paths}"));
        if let Some(must_include) = rule.must_include() {
            lines.push(format!("      must_include: {}", must_include.join(", ")));
        }
    }
    Ok(lines.join("\n"))
}
