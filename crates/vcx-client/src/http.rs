//! Shared send / status / decode steps for every call.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Send with retry, map transport errors, and reject non-2xx statuses.
pub(crate) async fn send<F, Fut>(
    endpoint: &str,
    max_retries: u32,
    f: F,
) -> Result<reqwest::Response, ClientError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let resp = crate::retry::retry_send(max_retries, f)
        .await
        .map_err(|e| ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::ApiError {
            endpoint: endpoint.to_string(),
            status,
            body,
        });
    }
    Ok(resp)
}

/// Decode a successful response body as JSON.
pub(crate) async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

/// `base` joined with an absolute path, tolerating a trailing slash on `base`.
pub(crate) fn url_for(base: &url::Url, path: &str) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), path)
}
