use serde::{Deserialize, Serialize};
use sheet_stitch::{PreviewRow, StitchReport, TablePreview};

pub const DEFAULT_PREVIEW_ROW_LIMIT: usize = 200;
pub const DEFAULT_DOWNLOAD_TTL_SECONDS: u32 = 60 * 60;
pub const FILES_FIELD: &str = "files";
pub const DEDUPLICATE_FIELD: &str = "deduplicate";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadFileResponse {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedFileResponse {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StitchReportResponse {
    pub succeeded: Vec<ReadFileResponse>,
    pub skipped: Vec<SkippedFileResponse>,
    pub rows_before_dedup: usize,
    pub duplicates_removed: Option<usize>,
    pub rows: usize,
}

impl From<&StitchReport> for StitchReportResponse {
    fn from(report: &StitchReport) -> Self {
        Self {
            succeeded: report
                .succeeded
                .iter()
                .map(|file| ReadFileResponse {
                    name: file.name.clone(),
                    rows: file.rows,
                })
                .collect(),
            skipped: report
                .skipped
                .iter()
                .map(|file| SkippedFileResponse {
                    name: file.name.clone(),
                    reason: file.reason.clone(),
                })
                .collect(),
            rows_before_dedup: report.rows_before_dedup,
            duplicates_removed: report.duplicates_removed,
            rows: report.output_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewRowResponse {
    pub index: usize,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TablePreviewResponse {
    pub headers: Vec<String>,
    pub rows: Vec<PreviewRowResponse>,
    pub total_rows: usize,
    pub truncated: bool,
}

impl From<TablePreview> for TablePreviewResponse {
    fn from(preview: TablePreview) -> Self {
        Self {
            headers: preview.headers,
            rows: preview
                .rows
                .into_iter()
                .map(|PreviewRow { index, cells }| PreviewRowResponse { index, cells })
                .collect(),
            total_rows: preview.total_rows,
            truncated: preview.truncated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StitchResponse {
    pub download_id: String,
    pub download_url: String,
    pub file_name: String,
    pub report: StitchReportResponse,
    pub messages: Vec<String>,
    pub table: TablePreviewResponse,
    pub button_state: String,
    pub stitched_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
