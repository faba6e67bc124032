use std::collections::HashMap;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sheet_stitch::EXPORT_FILE_NAME;
use worker::{Context, Env, Request, Response, Result, RouteContext, Router};

use crate::cache;
use crate::error::ApiError;
use crate::models::{DEFAULT_DOWNLOAD_TTL_SECONDS, DEFAULT_PREVIEW_ROW_LIMIT, StitchResponse};
use crate::page;
use crate::stitch_pipeline::{self, StitchOutcome};

pub const DOWNLOAD_PATH: &str = "/api/v1/download";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppState {
    pub preview_row_limit: usize,
    pub download_ttl_seconds: u32,
}

pub async fn handle(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let state = AppState {
        preview_row_limit: parse_setting(
            env.var("PREVIEW_ROW_LIMIT").ok().map(|value| value.to_string()),
            DEFAULT_PREVIEW_ROW_LIMIT,
        ),
        download_ttl_seconds: parse_setting(
            env.var("DOWNLOAD_TTL_SECONDS").ok().map(|value| value.to_string()),
            DEFAULT_DOWNLOAD_TTL_SECONDS,
        ),
    };

    Router::with_data(state)
        .get("/", index_route)
        .post_async("/api/v1/stitch", stitch_route)
        .get_async(DOWNLOAD_PATH, download_route)
        .run(req, env)
        .await
}

fn index_route(_req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    let mut response = Response::from_html(page::INDEX_HTML)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

async fn stitch_route(mut req: Request, ctx: RouteContext<AppState>) -> Result<Response> {
    match stitch_response(&mut req, ctx.data).await {
        Ok(response) => Ok(response),
        Err(error) => {
            worker::console_error!("stitch failed: {error}");
            error.into_response()
        }
    }
}

async fn download_route(req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    match download_response(&req).await {
        Ok(response) => Ok(response),
        Err(error) => error.into_response(),
    }
}

async fn stitch_response(req: &mut Request, state: AppState) -> Result<Response, ApiError> {
    let query = parse_query(req)?;
    let as_csv = wants_csv(&query);

    let form = req.form_data().await.map_err(|error| {
        ApiError::BadRequest(format!("expected a multipart/form-data upload: {error}"))
    })?;
    let request = stitch_pipeline::read_stitch_request(&form).await?;
    let outcome = stitch_pipeline::run_stitch(request, state.preview_row_limit)?;
    worker::console_log!(
        "stitched {} file(s), skipped {}, {} row(s)",
        outcome.report.succeeded.len(),
        outcome.report.skipped.len(),
        outcome.report.rows
    );

    if as_csv {
        return csv_response(
            outcome.csv.to_vec(),
            outcome.file_name,
            outcome.cache_status.as_header_value(),
        );
    }

    cache::store_export(&outcome.download_id, &outcome.csv, state.download_ttl_seconds).await?;
    let download_url = req
        .url()?
        .join(&download_path(&outcome.download_id))?
        .to_string();
    json_response(&stitch_body(outcome, download_url))
}

async fn download_response(req: &Request) -> Result<Response, ApiError> {
    let query = parse_query(req)?;
    let download_id = query
        .get("id")
        .ok_or_else(|| ApiError::BadRequest("missing 'id' query parameter".to_string()))?;
    if !cache::is_valid_download_id(download_id) {
        return Err(ApiError::BadRequest(
            "id must be a 64 character lowercase hex digest".to_string(),
        ));
    }

    let csv = cache::load_export(download_id).await?.ok_or_else(|| {
        ApiError::NotFound("stitched file is unknown or has expired; stitch again".to_string())
    })?;
    csv_response(csv, EXPORT_FILE_NAME, "HIT")
}

fn csv_response(csv: Vec<u8>, file_name: &str, cache_status: &str) -> Result<Response, ApiError> {
    let mut response = Response::from_bytes(csv)?;
    let headers = response.headers_mut();
    headers.set("Content-Type", cache::CSV_CONTENT_TYPE)?;
    headers.set("Content-Disposition", &content_disposition(file_name))?;
    headers.set("X-Cache-Status", cache_status)?;
    headers.set("Cache-Control", "no-store")?;
    Ok(response)
}

pub fn stitch_body(outcome: StitchOutcome, download_url: String) -> StitchResponse {
    StitchResponse {
        download_id: outcome.download_id,
        download_url,
        file_name: outcome.file_name.to_string(),
        report: outcome.report,
        messages: outcome.messages,
        table: outcome.preview,
        button_state: outcome.button_state.to_string(),
        stitched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

fn json_response<T>(payload: &T) -> Result<Response, ApiError>
where
    T: Serialize,
{
    let mut response = Response::from_json(payload)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

fn parse_query(req: &Request) -> Result<HashMap<String, String>, ApiError> {
    let url = req.url()?;
    let query = url
        .query_pairs()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<HashMap<_, _>>();
    Ok(query)
}

pub fn wants_csv(query: &HashMap<String, String>) -> bool {
    query
        .get("format")
        .is_some_and(|format| format.trim().eq_ignore_ascii_case("csv"))
}

pub fn download_path(download_id: &str) -> String {
    format!("{DOWNLOAD_PATH}?id={download_id}")
}

pub fn content_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}

/// Falls back to `default` when the variable is unset, unparsable, or zero.
pub fn parse_setting<T>(raw: Option<String>, default: T) -> T
where
    T: FromStr + PartialEq + Default,
{
    raw.and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value != T::default())
        .unwrap_or(default)
}
