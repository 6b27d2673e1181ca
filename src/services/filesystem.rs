use std::path::Path;

use async_trait::async_trait;

#[async_trait]
pub trait FileSystemService: Send + Sync {
    /// Whether `path` exists right now. Lookup failures read as `false`.
    async fn exists(&self, path: &Path) -> bool;
}
