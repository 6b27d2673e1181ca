pub mod filesystem;
pub mod version_control;

pub use filesystem::FileSystemService;
pub use version_control::{FetchDepth, VersionControlService};
