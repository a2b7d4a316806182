//! HTTP helpers for the upload and autocomplete endpoints.
//!
//! Browser (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning [`ClientError::Unavailable`] so the widgets
//! and their state models still compile and test without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics; upload transport failures
//! are logged by the chat widget, application-level rejections come back as
//! [`UploadResponse::Rejected`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ClientError;
#[cfg(any(test, feature = "csr"))]
use super::types::UploadResponse;

/// Multipart field the upload endpoint reads the file from.
pub const UPLOAD_FIELD: &str = "file";

/// Query-string key of the autocomplete endpoint.
pub const QUERY_PARAM: &str = "query";

/// Suggestion request URL for `query`, percent-encoded.
#[must_use]
pub fn autocomplete_request_url(endpoint: &str, query: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}{QUERY_PARAM}={}", urlencoding::encode(query))
}

/// Decide what an upload produced from its status and parsed body.
///
/// The server reports rejections as `{error}` with a 4xx status, so a body
/// that parses wins over the status code.
#[cfg(any(test, feature = "csr"))]
fn interpret_upload(status: u16, body: Option<UploadResponse>) -> Result<UploadResponse, ClientError> {
    match body {
        Some(response) => Ok(response),
        None if (200..300).contains(&status) => Err(ClientError::Decode(
            "upload response carried neither filename nor error".to_owned(),
        )),
        None => Err(ClientError::Status(status)),
    }
}

/// Upload one chat attachment as `multipart/form-data`.
///
/// # Errors
///
/// Returns a [`ClientError`] when the request cannot be sent or the response
/// is neither `{filename}` nor `{error}`.
#[cfg(feature = "csr")]
pub async fn upload_attachment(endpoint: &str, file: &web_sys::File) -> Result<UploadResponse, ClientError> {
    let js_err = |e: wasm_bindgen::JsValue| ClientError::Transport(format!("{e:?}"));

    let form = web_sys::FormData::new().map_err(js_err)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
        .map_err(js_err)?;

    let resp = gloo_net::http::Request::post(endpoint)
        .body(form)?
        .send()
        .await?;
    let status = resp.status();
    let body = resp.json::<UploadResponse>().await.ok();
    interpret_upload(status, body)
}

/// Fetch autocomplete suggestions for `query`.
///
/// # Errors
///
/// Returns a [`ClientError`] on transport failure, non-success status or a
/// body that is not a JSON array of strings.
pub async fn autocomplete_search(endpoint: &str, query: &str) -> Result<Vec<String>, ClientError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(&autocomplete_request_url(endpoint, query))
            .send()
            .await?;
        if !resp.ok() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json::<Vec<String>>().await?)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (endpoint, query);
        Err(ClientError::Unavailable)
    }
}
