pub mod diff_source;
pub mod evaluator;
pub mod precondition;
pub mod query;
pub mod runner;
