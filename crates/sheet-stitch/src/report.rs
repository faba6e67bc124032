#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFile {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

impl SkippedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Which files made it into the combined table and what deduplication did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StitchReport {
    pub succeeded: Vec<ReadFile>,
    pub skipped: Vec<SkippedFile>,
    pub rows_before_dedup: usize,
    pub duplicates_removed: Option<usize>,
}

impl StitchReport {
    #[must_use]
    pub fn succeeded_names(&self) -> Vec<&str> {
        self.succeeded.iter().map(|file| file.name.as_str()).collect()
    }

    #[must_use]
    pub fn skipped_names(&self) -> Vec<&str> {
        self.skipped.iter().map(|file| file.name.as_str()).collect()
    }

    #[must_use]
    pub fn output_rows(&self) -> usize {
        self.rows_before_dedup - self.duplicates_removed.unwrap_or(0)
    }
}
