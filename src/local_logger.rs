use std::{
    io::Write,
    sync::{Arc, Mutex},
    time::Duration,
};

use console::{Style, style};
use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;
use log::Log;
use simplelog::SharedLogger;

use crate::logger::{GroupEvent, get_group_event, get_log_level_from_env};

pub const LUARMOR_U8_COLOR_CODE: u8 = 105; // #8787FF

lazy_static! {
    static ref SPINNER: Arc<Mutex<Option<ProgressBar>>> = Arc::new(Mutex::new(None));
    static ref IS_TTY: bool = std::io::IsTerminal::is_terminal(&std::io::stdout());
}

/// Hide the spinner while `f` prints, then redraw it.
fn suspend_spinner<F: FnOnce() -> R, R>(f: F) -> R {
    if *IS_TTY {
        if let Ok(mut spinner) = SPINNER.lock() {
            if let Some(spinner) = spinner.as_mut() {
                return spinner.suspend(f);
            }
        }
    }

    f()
}

fn start_spinner(name: &str) {
    let template = format!(
        "  {{spinner:>.{0}}} {{wide_msg:.{0}.bold}}",
        LUARMOR_U8_COLOR_CODE
    );
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template(&template) {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(format!("{name}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    if let Ok(mut current) = SPINNER.lock() {
        current.replace(spinner);
    }
}

fn stop_spinner() {
    if let Ok(mut spinner) = SPINNER.lock() {
        if let Some(spinner) = spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Logger used when running outside of a CI, e.g. from a developer's terminal.
pub struct LocalLogger {
    log_level: log::LevelFilter,
}

impl LocalLogger {
    pub fn new() -> Self {
        Self {
            log_level: get_log_level_from_env(),
        }
    }
}

impl Log for LocalLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.log_level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Some(group_event) = get_group_event(record) {
            match group_event {
                GroupEvent::Start(name) => {
                    println!(
                        "\n{}",
                        style(format!("►►► {name} "))
                            .bold()
                            .color256(LUARMOR_U8_COLOR_CODE)
                    );
                    if *IS_TTY {
                        start_spinner(&name);
                    } else {
                        println!("{name}...");
                    }
                }
                GroupEvent::End => stop_spinner(),
            }
            return;
        }

        suspend_spinner(|| print_record(record));
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

fn print_record(record: &log::Record) {
    match record.level() {
        log::Level::Error => eprintln!("{}", Style::new().red().apply_to(record.args())),
        log::Level::Warn => eprintln!("{}", Style::new().yellow().apply_to(record.args())),
        log::Level::Info => println!("{}", record.args()),
        log::Level::Debug => println!(
            "{}",
            Style::new()
                .blue()
                .dim()
                .apply_to(format!("[DEBUG::{}] {}", record.target(), record.args())),
        ),
        log::Level::Trace => println!(
            "{}",
            Style::new()
                .black()
                .dim()
                .apply_to(format!("[TRACE::{}] {}", record.target(), record.args()))
        ),
    }
}

impl SharedLogger for LocalLogger {
    fn level(&self) -> log::LevelFilter {
        self.log_level
    }

    fn config(&self) -> Option<&simplelog::Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

/// Clear any spinner left behind, e.g. when the run fails inside a group.
pub fn clean_logger() {
    stop_spinner();
}

/// Print the failure of the run to the terminal.
pub fn report_local_failure(message: &str) {
    clean_logger();
    eprintln!("{} {}", style("Error:").red().bold(), style(message).red());
}
