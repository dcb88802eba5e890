mod polling;
mod resolve;


use std::path::Path;

use crate::api_client::{ScriptApi, UpdateResponse, VersionMarker};
use crate::config::Config;
use crate::error::UploadError;
use crate::prelude::*;
use console::style;
use reqwest::StatusCode;

use polling::poll_version_number;
use resolve::{get_script_version, resolve_project};

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// The API acknowledged the new content right away.
    Updated,
    /// The upload timed out at the gateway, and the new version showed up afterwards.
    UpdatedAfterTimeout { new_version: VersionMarker },
}

/// Read `file` and send it as the new content of the script.
///
/// Only 400 and 403 are turned into errors here, a gateway timeout is left to the caller.
pub async fn update_script(
    api: &dyn ScriptApi,
    script_id: &str,
    project_id: &str,
    file: &Path,
    api_key: &str,
) -> Result<UpdateResponse> {
    let script = tokio::fs::read_to_string(file)
        .await
        .map_err(|source| UploadError::File {
            path: file.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes from {}", script.len(), file.display());

    api.put_script(api_key, project_id, script_id, &script).await
}

pub async fn run(api: &dyn ScriptApi, config: &Config) -> Result<UploadOutcome> {
    start_group!("Resolving the script");
    let details = api.get_key_details(&config.api_key).await?;
    let project = resolve_project(&details, &config.script_id, config.project_id.as_deref())
        .ok_or_else(UploadError::project_not_found)?;
    let current_version = get_script_version(project, &config.script_id)
        .ok_or_else(UploadError::script_not_found)?
        .version
        .clone();
    info!(
        "Script {} belongs to project {}, current version: {current_version}",
        config.script_id, project.id
    );
    end_group!();

    start_group!("Uploading the script");
    let response = update_script(
        api,
        &config.script_id,
        &project.id,
        &config.file,
        &config.api_key,
    )
    .await?;
    end_group!();

    if response.status == StatusCode::GATEWAY_TIMEOUT {
        warn!("The upload timed out at the gateway, waiting for the new version to show up");
        start_group!("Waiting for the new script version");
        let new_version = poll_version_number(
            api,
            &config.api_key,
            &config.script_id,
            &project.id,
            &current_version,
        )
        .await?;
        end_group!();
        return Ok(UploadOutcome::UpdatedAfterTimeout { new_version });
    }

    if !response.status.is_success() {
        bail!(
            "Failed to update the script: {}\n  -> {} {}",
            response.status,
            style("Reason:").bold(),
            style(response.body).red()
        );
    }

    debug!("Update response: {}", response.body);
    Ok(UploadOutcome::Updated)
}
