use crate::api_client::{KeyDetails, Project, Script};

/// Find the project a script belongs to.
///
/// A non-empty `project_id` selects that project whatever its scripts are. Otherwise the
/// first project listing `script_id` wins.
pub fn resolve_project<'a>(
    details: &'a KeyDetails,
    script_id: &str,
    project_id: Option<&str>,
) -> Option<&'a Project> {
    match project_id.filter(|project_id| !project_id.is_empty()) {
        Some(project_id) => details
            .projects
            .iter()
            .find(|project| project.id == project_id),
        None => details.projects.iter().find(|project| {
            project
                .scripts
                .iter()
                .any(|script| script.script_id == script_id)
        }),
    }
}

pub fn get_script_version<'a>(project: &'a Project, script_id: &str) -> Option<&'a Script> {
    project
        .scripts
        .iter()
        .find(|script| script.script_id == script_id)
}
