use std::time::Duration;
use tokio::time::sleep;

use crate::api_client::{ScriptApi, VersionMarker};
use crate::error::UploadError;
use crate::prelude::*;

use super::resolve::{get_script_version, resolve_project};

pub const POLLING_INTERVAL: Duration = Duration::from_secs(5);

/// Poll the API until the version of the script differs from `current_version` and return
/// the new one.
///
/// There is no upper bound: this only returns once the version changed, or on the first error.
pub async fn poll_version_number(
    api: &dyn ScriptApi,
    api_key: &str,
    script_id: &str,
    project_id: &str,
    current_version: &VersionMarker,
) -> Result<VersionMarker> {
    loop {
        let details = api.get_key_details(api_key).await?;
        let project = resolve_project(&details, script_id, Some(project_id))
            .ok_or_else(UploadError::project_not_found)?;
        let script =
            get_script_version(project, script_id).ok_or_else(UploadError::script_not_found)?;

        if &script.version != current_version {
            info!("New script version: {}", script.version);
            return Ok(script.version.clone());
        }

        debug!(
            "Script version is still {current_version}, checking again in {}s",
            POLLING_INTERVAL.as_secs()
        );
        sleep(POLLING_INTERVAL).await;
    }
}
