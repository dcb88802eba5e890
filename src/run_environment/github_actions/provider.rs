use simplelog::SharedLogger;
use std::env;

use crate::run_environment::provider::{
    RunEnvironment, RunEnvironmentDetector, RunEnvironmentProvider,
};

use super::logger::{GithubActionLogger, error_command};

#[derive(Debug)]
pub struct GitHubActionsProvider;

impl RunEnvironmentDetector for GitHubActionsProvider {
    fn detect() -> bool {
        // check if the GITHUB_ACTIONS environment variable is set and the value is truthy
        env::var("GITHUB_ACTIONS") == Ok("true".into())
    }
}

impl RunEnvironmentProvider for GitHubActionsProvider {
    fn get_logger(&self) -> Box<dyn SharedLogger> {
        Box::new(GithubActionLogger::new())
    }

    fn get_run_environment(&self) -> RunEnvironment {
        RunEnvironment::GithubActions
    }

    /// The step is failed through an `::error::` annotation, the exit status is set by the caller.
    fn report_failure(&self, message: &str) {
        println!("{}", error_command(message));
    }
}
