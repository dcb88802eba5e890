use crate::{
    api_client::LuarmorApiClient,
    config::Config,
    local_logger::LUARMOR_U8_COLOR_CODE,
    prelude::*,
    run_environment::RunEnvironmentProvider,
    upload::{self, UploadOutcome},
};
use clap::{
    Parser,
    builder::{Styles, styling},
};
use simplelog::CombinedLogger;

fn create_styles() -> Styles {
    styling::Styles::styled()
        .header(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(
            styling::Ansi256Color(LUARMOR_U8_COLOR_CODE).on_default() | styling::Effects::BOLD,
        )
        .placeholder(styling::AnsiColor::Cyan.on_default())
}

/// Every input can be given as a flag or through the `INPUT_*` variables GitHub Actions sets
/// for the inputs of an action. Required inputs are checked by [`Config`], since an action
/// input left blank is still exported, as an empty variable.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Upload a script to Luarmor and wait for the new version to go live",
    styles = create_styles()
)]
pub struct Cli {
    /// The URL of the Luarmor API
    #[arg(
        long,
        env = "LUARMOR_API_URL",
        hide = true,
        default_value = crate::api_client::DEFAULT_API_URL
    )]
    pub api_url: String,

    /// The Luarmor API key
    #[arg(long, env = "INPUT_API-KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// The identifier of the script to update
    #[arg(long, env = "INPUT_SCRIPT-ID")]
    pub script_id: Option<String>,

    /// The identifier of the project owning the script.
    /// When empty, the first project containing the script is used.
    #[arg(long, env = "INPUT_PROJECT-ID")]
    pub project_id: Option<String>,

    /// Path to the file holding the new content of the script
    #[arg(long, env = "INPUT_FILE")]
    pub file: Option<String>,
}

fn init_logger(provider: &dyn RunEnvironmentProvider) -> Result<()> {
    CombinedLogger::init(vec![provider.get_logger()]).context("Failed to init logger")?;
    Ok(())
}

/// Parse the command line. Usage errors are returned so they are reported like any other
/// failure; `--help` and `--version` still print and exit right away.
fn parse_cli<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => Err(anyhow!(err.render().to_string().trim_end().to_string())),
    }
}

pub async fn run(provider: &dyn RunEnvironmentProvider) -> Result<()> {
    let cli = parse_cli(std::env::args_os())?;
    init_logger(provider)?;

    debug!("Run environment: {:?}", provider.get_run_environment());

    let config = Config::try_from(cli)?;
    debug!("config: {config:#?}");
    let api_client = LuarmorApiClient::new(config.api_url.clone());

    match upload::run(&api_client, &config).await? {
        UploadOutcome::Updated => info!("Script {} updated", config.script_id),
        UploadOutcome::UpdatedAfterTimeout { new_version } => info!(
            "Script {} updated, now at version {new_version}",
            config.script_id
        ),
    }

    Ok(())
}
