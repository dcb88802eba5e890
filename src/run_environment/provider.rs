use simplelog::SharedLogger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnvironment {
    GithubActions,
    Local,
}

pub trait RunEnvironmentDetector {
    /// Detects if the uploader is currently executed within this run environment.
    fn detect() -> bool;
}

/// `RunEnvironmentProvider` abstracts the host the uploader is running in:
/// where logs go and how a failed run is reported back to it.
pub trait RunEnvironmentProvider {
    /// Returns the logger for the RunEnvironment.
    fn get_logger(&self) -> Box<dyn SharedLogger>;

    /// Returns the run environment of the current provider.
    fn get_run_environment(&self) -> RunEnvironment;

    /// Mark the run as failed, with `message` as the only diagnostic.
    fn report_failure(&self, message: &str);
}
