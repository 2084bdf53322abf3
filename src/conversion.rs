//! Client for the conversion proxy that turns a Spotify link into an MP3.
//!
//! The proxy works in two calls: the first registers the track and returns a
//! task handle, the second returns the relative path of the converted file.

use reqwest::{Client, RequestBuilder, header};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::ResolveError,
    types::{
        ConversionInfoResponse, ConversionJob, ConversionTaskResponse, TrackQuery,
    },
};

// The proxy refuses requests that do not look like they come from a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Mobile Safari/537.36";

fn with_browser_headers(req: RequestBuilder) -> RequestBuilder {
    req.header(header::ACCEPT, "application/json, text/plain, */*")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
}

fn id_to_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ResolveError> {
    serde_json::from_str(body)
        .map_err(|e| ResolveError::DownloadUnavailable(format!("unreadable {}: {}", what, e)))
}

/// Submits the track link and returns the conversion task handle.
pub async fn request_job(
    client: &Client,
    base_url: &str,
    query: &TrackQuery,
) -> Result<ConversionJob, ResolveError> {
    let res = with_browser_headers(client.get(format!("{}/spotify/get", base_url)))
        .query(&[("url", query.as_str())])
        .send()
        .await?
        .error_for_status()?;

    let info: ConversionInfoResponse = decode(&res.text().await?, "conversion task")?;

    let Some(result) = info.result else {
        return Err(ResolveError::DownloadUnavailable(
            "conversion service returned no task".to_string(),
        ));
    };

    match (id_to_string(result.gid), id_to_string(result.id)) {
        (Some(gid), Some(id)) => Ok(ConversionJob { gid, id }),
        _ => Err(ResolveError::DownloadUnavailable(
            "conversion task handle is incomplete".to_string(),
        )),
    }
}

/// Looks up the converted artifact of a task and returns its relative path.
pub async fn get_download_path(
    client: &Client,
    base_url: &str,
    job: &ConversionJob,
) -> Result<String, ResolveError> {
    let api_url = format!(
        "{}/spotify/mp3-convert-task/{}/{}",
        base_url, job.gid, job.id
    );

    let res = with_browser_headers(client.get(&api_url))
        .send()
        .await?
        .error_for_status()?;

    let task: ConversionTaskResponse = decode(&res.text().await?, "conversion result")?;

    task.result
        .and_then(|t| t.download_url)
        .filter(|path| !path.trim().is_empty())
        .ok_or_else(|| {
            ResolveError::DownloadUnavailable(format!(
                "no download path for task {}/{}",
                job.gid, job.id
            ))
        })
}
