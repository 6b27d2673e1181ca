pub mod diff;
pub mod rule;
