mod provider;

use github_actions::GitHubActionsProvider;
use local::LocalProvider;
use provider::RunEnvironmentDetector;

pub use self::provider::RunEnvironmentProvider;

// RunEnvironment Provider implementations
mod github_actions;
mod local;

pub fn get_provider() -> Box<dyn RunEnvironmentProvider> {
    if GitHubActionsProvider::detect() {
        return Box::new(GitHubActionsProvider);
    }

    Box::new(LocalProvider)
}
