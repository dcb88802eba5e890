use std::path::PathBuf;

use crate::app::Cli;
use crate::prelude::*;
use url::Url;

/// The inputs of an upload run, once trimmed and checked.
pub struct Config {
    pub api_url: Url,
    pub api_key: String,
    pub script_id: String,
    /// `None` when the project has to be found from the script id.
    pub project_id: Option<String>,
    pub file: PathBuf,
}

// The API key is kept out of the debug logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"***")
            .field("script_id", &self.script_id)
            .field("project_id", &self.project_id)
            .field("file", &self.file)
            .finish()
    }
}

/// Trim an input the way the action toolkit does, mapping blank values to `None`.
fn optional_input(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required_input(value: Option<String>, name: &str) -> Result<String> {
    optional_input(value).ok_or_else(|| anyhow!("{name} input is required"))
}

impl TryFrom<Cli> for Config {
    type Error = Error;
    fn try_from(cli: Cli) -> Result<Self> {
        let api_url = Url::parse(&cli.api_url)
            .map_err(|e| anyhow!("Invalid API URL: {}, {e}", cli.api_url))?;

        Ok(Self {
            api_url,
            api_key: required_input(cli.api_key, "api-key")?,
            script_id: required_input(cli.script_id, "script-id")?,
            project_id: optional_input(cli.project_id),
            file: PathBuf::from(required_input(cli.file, "file")?),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Constructs a new `Config` pointing at `file`, for testing purposes
    pub fn test(file: impl Into<PathBuf>) -> Self {
        Self {
            api_url: Url::parse(crate::api_client::DEFAULT_API_URL).unwrap(),
            api_key: "test-api-key".into(),
            script_id: "S1".into(),
            project_id: None,
            file: file.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Cli {
        Cli {
            api_url: crate::api_client::DEFAULT_API_URL.into(),
            api_key: Some("key".into()),
            script_id: Some("s1".into()),
            project_id: None,
            file: Some("main.lua".into()),
        }
    }

    #[test]
    fn test_try_from_cli() {
        let config = Config::try_from(Cli {
            api_key: Some("  key\n".into()),
            project_id: Some(" p1 ".into()),
            ..cli()
        })
        .unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.script_id, "s1");
        assert_eq!(config.project_id.as_deref(), Some("p1"));
        assert_eq!(config.file, PathBuf::from("main.lua"));
        assert_eq!(config.api_url.as_str(), "https://api.luarmor.net/v3/");
    }

    #[test]
    fn test_empty_project_id_is_unset() {
        let config = Config::try_from(Cli {
            project_id: Some("".into()),
            ..cli()
        })
        .unwrap();
        assert_eq!(config.project_id, None);

        let config = Config::try_from(Cli {
            project_id: Some("   ".into()),
            ..cli()
        })
        .unwrap();
        assert_eq!(config.project_id, None);
    }

    #[test]
    fn test_missing_required_inputs() {
        let err = Config::try_from(Cli {
            api_key: None,
            ..cli()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "api-key input is required");

        let err = Config::try_from(Cli {
            script_id: Some(" ".into()),
            ..cli()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "script-id input is required");

        let err = Config::try_from(Cli {
            file: Some("".into()),
            ..cli()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "file input is required");
    }

    #[test]
    fn test_invalid_api_url() {
        let err = Config::try_from(Cli {
            api_url: "not a url".into(),
            ..cli()
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("Invalid API URL: not a url"));
    }

    #[test]
    fn test_debug_hides_the_api_key() {
        let config = Config::try_from(Cli {
            api_key: Some("super-secret".into()),
            ..cli()
        })
        .unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
