use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{FileSystemService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub filesystem: Arc<dyn FileSystemService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        filesystem: Arc<dyn FileSystemService>,
    ) -> Self {
        Self {
            config,
            version_control,
            filesystem,
        }
    }
}
