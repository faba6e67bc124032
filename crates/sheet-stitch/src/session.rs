use std::sync::Arc;

use crate::csv_out::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use crate::error::StitchError;
use crate::export_cache::{CsvExportCache, ExportCacheStatus};
use crate::model::{CombinedTable, UploadedFile};
use crate::options::{ExportOptions, StitchOptions};
use crate::progress::Progress;
use crate::report::StitchReport;
use crate::stitch_with_options;

/// Visual emphasis of the stitch button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Primary,
    Secondary,
}

impl ButtonState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// A ready-to-serve CSV download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub digest: String,
    pub bytes: Arc<[u8]>,
    pub cache_status: ExportCacheStatus,
}

/// Everything the upload screen remembers between user actions.
#[derive(Debug, Clone, Default)]
pub struct StitchSession {
    uploaded_files: Vec<UploadedFile>,
    result: Option<CombinedTable>,
    report: Option<StitchReport>,
    options: StitchOptions,
    export_options: ExportOptions,
    button_state: ButtonState,
    export_cache: CsvExportCache,
}

impl StitchSession {
    #[must_use]
    pub fn new(options: StitchOptions, export_options: ExportOptions) -> Self {
        Self {
            options,
            export_options,
            ..Self::default()
        }
    }

    /// Replaces the uploaded files; the previous result no longer applies.
    pub fn set_uploaded_files(&mut self, files: Vec<UploadedFile>) {
        self.uploaded_files = files;
        self.result = None;
        self.report = None;
        self.export_cache.invalidate();
        self.button_state = ButtonState::Primary;
    }

    pub fn set_deduplicate(&mut self, deduplicate: bool) {
        self.options.deduplicate = deduplicate;
    }

    #[must_use]
    pub fn deduplicate(&self) -> bool {
        self.options.deduplicate
    }

    #[must_use]
    pub fn uploaded_files(&self) -> &[UploadedFile] {
        &self.uploaded_files
    }

    #[must_use]
    pub fn can_stitch(&self) -> bool {
        !self.uploaded_files.is_empty()
    }

    #[must_use]
    pub fn button_state(&self) -> ButtonState {
        self.button_state
    }

    #[must_use]
    pub fn result(&self) -> Option<&CombinedTable> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn report(&self) -> Option<&StitchReport> {
        self.report.as_ref()
    }

    /// Stitches the uploaded files and keeps the outcome.
    pub fn stitch<P: Progress>(&mut self, progress: &mut P) -> Result<&StitchReport, StitchError> {
        self.result = None;
        self.report = None;

        let outcome = stitch_with_options(&self.uploaded_files, &self.options, progress);
        self.button_state = ButtonState::Secondary;
        let (table, report) = outcome?;

        self.result = Some(table);
        let report: &StitchReport = self.report.insert(report);
        Ok(report)
    }

    /// CSV bytes of the current result, converted at most once per table.
    pub fn download(&mut self) -> Result<Option<Download>, StitchError> {
        let Some(table) = &self.result else {
            return Ok(None);
        };

        let (export, cache_status) = self
            .export_cache
            .get_or_convert(table, &self.export_options)?;
        Ok(Some(Download {
            file_name: EXPORT_FILE_NAME,
            mime_type: EXPORT_MIME_TYPE,
            digest: export.digest,
            bytes: export.bytes,
            cache_status,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{ButtonState, StitchSession};
    use crate::error::StitchError;
    use crate::export_cache::ExportCacheStatus;
    use crate::model::UploadedFile;
    use crate::progress::StitchEvent;

    fn quiet(_: &StitchEvent) {}

    #[test]
    fn refuses_to_stitch_without_uploads() {
        let mut session = StitchSession::default();
        assert!(!session.can_stitch());

        let err = session.stitch(&mut quiet).expect_err("no files should fail");
        assert!(matches!(err, StitchError::NoValidInput { .. }));
        assert!(session.result().is_none());
    }

    #[test]
    fn tracks_button_state_and_result_across_actions() {
        let mut session = StitchSession::default();
        session.set_uploaded_files(vec![
            UploadedFile::new("a.csv", "id,v\n1,x\n2,y\n"),
            UploadedFile::new("b.csv", "id,v\n1,x\n"),
        ]);
        session.set_deduplicate(true);
        assert_eq!(session.button_state(), ButtonState::Primary);

        let report = session.stitch(&mut quiet).expect("stitch should succeed");
        assert_eq!(report.duplicates_removed, Some(1));
        assert_eq!(session.button_state(), ButtonState::Secondary);
        assert_eq!(session.result().map(|table| table.row_count()), Some(2));

        session.set_uploaded_files(vec![UploadedFile::new("c.csv", "id\n3\n")]);
        assert!(session.result().is_none());
        assert_eq!(session.button_state(), ButtonState::Primary);
    }

    #[test]
    fn download_is_converted_once_per_result() {
        let mut session = StitchSession::default();
        assert!(session.download().expect("download").is_none());

        session.set_uploaded_files(vec![UploadedFile::new("a.csv", "id\n1\n")]);
        session.stitch(&mut quiet).expect("stitch should succeed");

        let first = session.download().expect("download").expect("result exists");
        assert_eq!(first.file_name, "stitched_data.csv");
        assert_eq!(first.mime_type, "text/csv");
        assert_eq!(&*first.bytes, b"id\n1\n");
        assert_eq!(first.cache_status, ExportCacheStatus::Miss);

        let second = session.download().expect("download").expect("result exists");
        assert_eq!(second.cache_status, ExportCacheStatus::Hit);
        assert_eq!(second.digest, first.digest);
    }

    #[test]
    fn failed_stitch_leaves_no_result() {
        let mut session = StitchSession::default();
        session.set_uploaded_files(vec![UploadedFile::new("a.csv", "id\n1\n")]);
        session.stitch(&mut quiet).expect("stitch should succeed");

        session.set_uploaded_files(vec![UploadedFile::new("bad.xlsx", "nope")]);
        session.stitch(&mut quiet).expect_err("unreadable upload should fail");
        assert!(session.result().is_none());
        assert_eq!(session.button_state(), ButtonState::Secondary);
    }
}
