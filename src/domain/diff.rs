/// One file touched by a diff query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path after the change; for renames this is the destination.
    pub file: String,
    /// Source path when the change is a rename.
    pub old_file: Option<String>,
    pub insertions: usize,
    pub deletions: usize,
    pub binary: bool,
}

impl FileChange {
    pub fn text(file: impl Into<String>, insertions: usize, deletions: usize) -> Self {
        Self {
            file: file.into(),
            old_file: None,
            insertions,
            deletions,
            binary: false,
        }
    }
}

/// Summary of a diff query. `changed` is the match signal; a touched file can
/// have no line delta (renames, mode changes, binaries).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub changed: usize,
    pub files: Vec<FileChange>,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffResult {
    pub fn from_files(files: Vec<FileChange>) -> Self {
        let insertions = files.iter().map(|change| change.insertions).sum();
        let deletions = files.iter().map(|change| change.deletions).sum();
        Self {
            changed: files.len(),
            files,
            insertions,
            deletions,
        }
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|change| change.file.as_str()).collect()
    }
}
