use crate::logger::{GroupEvent, get_group_event, get_log_level_from_env};
use log::*;
use simplelog::SharedLogger;
use std::{env, io::Write};

/// A logger that prints logs in the format expected by GitHub Actions, with grouping support.
///
/// See https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions
pub struct GithubActionLogger {
    log_level: LevelFilter,
}

impl GithubActionLogger {
    pub fn new() -> Self {
        // Only enable debug logging if it's enabled in GitHub Actions.
        // See: https://docs.github.com/en/actions/reference/workflows-and-actions/variables
        let log_level = if env::var("RUNNER_DEBUG").unwrap_or_default() == "1" {
            LevelFilter::Trace
        } else {
            get_log_level_from_env()
        };

        Self { log_level }
    }
}

impl Log for GithubActionLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Some(group_event) = get_group_event(record) {
            match group_event {
                GroupEvent::Start(name) => println!("::group::{name}"),
                GroupEvent::End => println!("::endgroup::"),
            }
            return;
        }

        if record.level() > self.log_level {
            return;
        }

        for line in format_record(record.level(), &record.args().to_string()) {
            println!("{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

impl SharedLogger for GithubActionLogger {
    fn level(&self) -> LevelFilter {
        self.log_level
    }

    fn config(&self) -> Option<&simplelog::Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

fn format_record(level: Level, message: &str) -> Vec<String> {
    let prefix = match level {
        Level::Error => "::error::",
        Level::Warn => "::warning::",
        Level::Info => "",
        Level::Debug => "::debug::",
        Level::Trace => "::debug::[TRACE]",
    };
    // ensure that all the lines of the message have the prefix, otherwise GitHub Actions will not recognize the command for the whole string
    message.lines().map(|line| format!("{prefix}{line}")).collect()
}

/// Escape the data of a workflow command so that it survives on a single line.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Build the `::error::` command that marks the current step as failed.
pub(super) fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record_prefixes_every_line() {
        assert_eq!(
            format_record(Level::Warn, "first\nsecond"),
            vec!["::warning::first", "::warning::second"]
        );
        assert_eq!(format_record(Level::Info, "plain"), vec!["plain"]);
        assert_eq!(
            format_record(Level::Trace, "deep"),
            vec!["::debug::[TRACE]deep"]
        );
    }

    #[test]
    fn test_error_command_is_single_line() {
        assert_eq!(
            error_command("403, is your IP whitelisted?\nretry later: 100%"),
            "::error::403, is your IP whitelisted?%0Aretry later: 100%25"
        );
    }
}
