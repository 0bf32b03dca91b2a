//! HTTP retrieval of the source dataset.
//!
//! A single GET with a bounded timeout. Non-success statuses are errors;
//! there are no retries.

use reqwest::Url;

use crate::config::{Settings, USER_AGENT};
use crate::error::{FetchError, FetchResult};
use crate::logs::{log_info_indent, log_success};

/// Download the body at `url`.
pub async fn fetch_csv(url: &str, settings: &Settings) -> FetchResult<Vec<u8>> {
    let parsed = parse_url(url)?;

    let client = reqwest::Client::builder()
        .timeout(settings.timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))?;

    log_info_indent(format!("GET {}", parsed), 1);
    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| classify(url, settings, e))?;

    let status = response.status();
    log_info_indent(format!("Response status: {}", status), 1);

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify(url, settings, e))?;

    log_success(format!("Received {} bytes", body.len()));
    Ok(body.to_vec())
}

/// Only absolute http(s) URLs are accepted.
fn parse_url(url: &str) -> FetchResult<Url> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            message: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

fn classify(url: &str, settings: &Settings, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            seconds: settings.timeout.as_secs(),
        }
    } else {
        FetchError::RequestFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
