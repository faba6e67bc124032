use worker::{Cache, Response};

use crate::error::ApiError;

pub const EXPORT_CACHE_KEY_PREFIX: &str = "csv:stitched:v1:";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Download ids are the hex SHA-256 digest of the stitched table.
pub fn is_valid_download_id(download_id: &str) -> bool {
    download_id.len() == 64
        && download_id
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
}

pub fn export_cache_key(download_id: &str) -> String {
    format!("{EXPORT_CACHE_KEY_PREFIX}{download_id}")
}

fn cache_url(download_id: &str) -> String {
    format!(
        "https://cache.local/{}",
        urlencoding::encode(&export_cache_key(download_id))
    )
}

pub async fn load_export(download_id: &str) -> Result<Option<Vec<u8>>, ApiError> {
    let cache = Cache::default();
    let mut cached = cache.get(cache_url(download_id), true).await?;

    let Some(mut response) = cached.take() else {
        return Ok(None);
    };

    let csv = response.bytes().await?;
    Ok(Some(csv))
}

pub async fn store_export(download_id: &str, csv: &[u8], ttl_seconds: u32) -> Result<(), ApiError> {
    let cache = Cache::default();
    let mut response = Response::from_bytes(csv.to_vec())?;
    response
        .headers_mut()
        .set("Cache-Control", &format!("public, max-age={ttl_seconds}"))?;
    response.headers_mut().set("Content-Type", CSV_CONTENT_TYPE)?;

    cache.put(cache_url(download_id), response).await?;
    Ok(())
}
