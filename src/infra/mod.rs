pub mod actions;
pub mod fs;
pub mod git;
