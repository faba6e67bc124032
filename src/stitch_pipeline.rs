use std::sync::Arc;

use sheet_stitch::{
    ExportCacheStatus, ExportOptions, StitchEvent, StitchOptions, StitchSession, TablePreview,
    UploadedFile,
};
use worker::{FormData, FormEntry};

use crate::error::ApiError;
use crate::models::{DEDUPLICATE_FIELD, FILES_FIELD, StitchReportResponse, TablePreviewResponse};

/// The files and toggle pulled out of one upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchRequest {
    pub files: Vec<UploadedFile>,
    pub deduplicate: bool,
}

#[derive(Debug, Clone)]
pub struct StitchOutcome {
    pub download_id: String,
    pub csv: Arc<[u8]>,
    pub file_name: &'static str,
    pub cache_status: ExportCacheStatus,
    pub report: StitchReportResponse,
    pub messages: Vec<String>,
    pub preview: TablePreviewResponse,
    pub button_state: &'static str,
}

pub fn parse_flag(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    matches!(lowered.as_str(), "true" | "1" | "yes" | "on")
}

pub async fn read_stitch_request(form: &FormData) -> Result<StitchRequest, ApiError> {
    let mut files = Vec::new();
    for entry in form.get_all(FILES_FIELD).unwrap_or_default() {
        let FormEntry::File(file) = entry else {
            continue;
        };
        let content = file.bytes().await?;
        files.push(UploadedFile::new(file.name(), content));
    }

    let deduplicate = match form.get(DEDUPLICATE_FIELD) {
        Some(FormEntry::Field(value)) => parse_flag(&value),
        _ => false,
    };

    Ok(StitchRequest { files, deduplicate })
}

/// Runs one stitch through a fresh session and prepares everything the
/// response needs.
pub fn run_stitch(request: StitchRequest, preview_limit: usize) -> Result<StitchOutcome, ApiError> {
    let mut session = StitchSession::new(StitchOptions::default(), ExportOptions::default());
    session.set_uploaded_files(request.files);
    session.set_deduplicate(request.deduplicate);
    if !session.can_stitch() {
        return Err(ApiError::BadRequest(format!(
            "no files uploaded; send one or more '{FILES_FIELD}' entries"
        )));
    }

    let mut messages = Vec::new();
    let report = session.stitch(&mut |event: &StitchEvent| messages.push(event.to_string()))?;
    let report = StitchReportResponse::from(report);

    let preview = session
        .result()
        .map(|table| TablePreview::new(table, preview_limit))
        .ok_or_else(|| ApiError::Internal("stitch finished without a result".to_string()))?;
    let download = session
        .download()?
        .ok_or_else(|| ApiError::Internal("stitched table could not be exported".to_string()))?;

    Ok(StitchOutcome {
        download_id: download.digest,
        csv: download.bytes,
        file_name: download.file_name,
        cache_status: download.cache_status,
        report,
        messages,
        preview: preview.into(),
        button_state: session.button_state().as_str(),
    })
}
