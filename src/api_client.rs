use std::fmt::Display;

use crate::error::UploadError;
use crate::prelude::*;
use crate::request_client::REQUEST_CLIENT;
use async_trait::async_trait;
use console::style;
use reqwest::StatusCode;
use reqwest_middleware::RequestBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.luarmor.net/v3/";

/// Details of an API key, as returned by `GET /keys/{api_key}/details`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct KeyDetails {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub scripts: Vec<Script>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Script {
    pub script_id: String,
    #[serde(rename = "script_version", alias = "version")]
    pub version: VersionMarker,
}

/// Opaque token that changes every time the content of a script changes.
///
/// It is only ever compared for equality, whatever its JSON type.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VersionMarker(Value);

#[cfg(test)]
impl VersionMarker {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }
}

impl Display for VersionMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(version) => write!(f, "{version}"),
            other => write!(f, "{other}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateScriptBody<'a> {
    script: &'a str,
}

/// What came back from an update request, left uninterpreted apart from 400/403.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResponse {
    pub status: StatusCode,
    pub body: String,
}

/// The subset of the Luarmor API used to publish a script.
#[async_trait(?Send)]
pub trait ScriptApi {
    /// Fetch the projects and scripts reachable with `api_key`.
    async fn get_key_details(&self, api_key: &str) -> Result<KeyDetails>;

    /// Replace the content of a script. A gateway timeout is returned, not raised.
    async fn put_script(
        &self,
        api_key: &str,
        project_id: &str,
        script_id: &str,
        script: &str,
    ) -> Result<UpdateResponse>;
}

/// Map the statuses the API gives a meaning to onto errors.
///
/// `ignore_timeout` lets a 504 through, for the callers that know how to recover from it.
pub fn check_status(status: StatusCode, ignore_timeout: bool) -> Result<(), UploadError> {
    match status {
        // Bad request, usually an invalid API key
        StatusCode::BAD_REQUEST => Err(UploadError::Auth("400, is your API key valid?".into())),
        // Forbidden, usually because the IP is not whitelisted
        StatusCode::FORBIDDEN => Err(UploadError::Auth(
            "403, is your IP whitelisted and is your API key correct?".into(),
        )),
        StatusCode::GATEWAY_TIMEOUT if !ignore_timeout => Err(UploadError::GatewayTimeout),
        _ => Ok(()),
    }
}

pub struct LuarmorApiClient {
    api_url: Url,
}

impl LuarmorApiClient {
    pub fn new(api_url: Url) -> Self {
        Self { api_url }
    }

    /// Append percent-encoded path segments to the API URL, with or without its trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid API URL: {}", self.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, ignore_timeout: bool) -> Result<reqwest::Response> {
        let response = request.send().await?;
        trace!("{} {}", response.status(), response.url());
        check_status(response.status(), ignore_timeout)?;
        Ok(response)
    }
}

#[async_trait(?Send)]
impl ScriptApi for LuarmorApiClient {
    async fn get_key_details(&self, api_key: &str) -> Result<KeyDetails> {
        let url = self.endpoint(&["keys", api_key, "details"])?;
        let response = self.send(REQUEST_CLIENT.get(url), false).await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            bail!(
                "Failed to fetch the API key details: {}\n  -> {} {}",
                status,
                style("Reason:").bold(),
                style(text).red()
            );
        }

        serde_json::from_str(&text).context("Failed to parse the API key details")
    }

    async fn put_script(
        &self,
        api_key: &str,
        project_id: &str,
        script_id: &str,
        script: &str,
    ) -> Result<UpdateResponse> {
        let url = self.endpoint(&["projects", project_id, "scripts", script_id])?;
        let request = REQUEST_CLIENT
            .put(url)
            .header("Authorization", api_key)
            .json(&UpdateScriptBody { script });
        let response = self.send(request, true).await?;

        Ok(UpdateResponse {
            status: response.status(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}
