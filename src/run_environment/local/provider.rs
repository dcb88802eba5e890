use simplelog::SharedLogger;

use crate::local_logger::{LocalLogger, report_local_failure};
use crate::run_environment::provider::{
    RunEnvironment, RunEnvironmentDetector, RunEnvironmentProvider,
};

#[derive(Debug)]
pub struct LocalProvider;

impl RunEnvironmentDetector for LocalProvider {
    fn detect() -> bool {
        true
    }
}

impl RunEnvironmentProvider for LocalProvider {
    fn get_logger(&self) -> Box<dyn SharedLogger> {
        Box::new(LocalLogger::new())
    }

    fn get_run_environment(&self) -> RunEnvironment {
        RunEnvironment::Local
    }

    fn report_failure(&self, message: &str) {
        report_local_failure(message);
    }
}
