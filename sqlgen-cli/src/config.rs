use std::{
    env,
    error::Error,
    fmt::Display,
    path::{Path, PathBuf},
};

use dotenvy::dotenv;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "sqlgen.toml";
const CONFIG_ENV: &str = "SQLGEN_CONFIG";

#[derive(Debug, Clone)]
pub enum ConfigError {
    ConfigNotFound { path: PathBuf },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound { path } => write!(
                f,
                "Config file {} not found, run `sqlgen init` or set the {CONFIG_ENV} environment variable.",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CodeGenerator {
    #[default]
    #[serde(rename = "typescript")]
    TypeScript,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RequestSource {
    Single(PathBuf),
    List(Vec<PathBuf>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[must_use]
pub struct TomlConfig {
    pub path: RequestSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    #[serde(default = "CodeGenerator::default")]
    pub mode: CodeGenerator,
    #[serde(default = "bool::default")]
    pub skip_unsupported: bool,
}

#[derive(Debug, Clone)]
pub struct SqlGenConfig {
    pub source: Vec<PathBuf>,
    pub target: Option<PathBuf>,
    pub mode: CodeGenerator,
    pub skip_unsupported: bool,
}

impl SqlGenConfig {
    pub fn from_toml_config(config: TomlConfig) -> Self {
        let source = match config.path {
            RequestSource::Single(item) => vec![item],
            RequestSource::List(items) => items,
        };

        Self {
            source,
            target: config.target,
            mode: config.mode,
            skip_unsupported: config.skip_unsupported,
        }
    }
}

/// Picks the config file: the explicit path, then `SQLGEN_CONFIG` (a `.env`
/// file is honoured), then `sqlgen.toml`.
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Err(err) = dotenv() {
        tracing::debug!("No .env file loaded: {err}");
    }
    explicit
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub fn get_config(path: &Path) -> Result<SqlGenConfig, Box<dyn Error>> {
    if !std::fs::exists(path)? {
        Err(ConfigError::ConfigNotFound {
            path: path.to_owned(),
        })?
    }
    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)?;
    Ok(SqlGenConfig::from_toml_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_source_defaults() {
        let config: TomlConfig = toml::from_str(r#"path = "gen/request.json""#).unwrap();
        let config = SqlGenConfig::from_toml_config(config);
        assert_eq!(config.source, [PathBuf::from("gen/request.json")]);
        assert_eq!(config.target, None);
        assert_eq!(config.mode, CodeGenerator::TypeScript);
        assert!(!config.skip_unsupported);
    }

    #[test]
    fn full_config() {
        let config: TomlConfig = toml::from_str(
            r#"
path = ["a.json", "b.json"]
target = "src/db"
mode = "json"
skip-unsupported = true
"#,
        )
        .unwrap();
        let config = SqlGenConfig::from_toml_config(config);
        assert_eq!(
            config.source,
            [PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
        assert_eq!(config.target, Some(PathBuf::from("src/db")));
        assert_eq!(config.mode, CodeGenerator::Json);
        assert!(config.skip_unsupported);
    }

    #[test]
    fn typescript_mode_name() {
        let config: TomlConfig =
            toml::from_str("path = \"r.json\"\nmode = \"typescript\"").unwrap();
        assert_eq!(config.mode, CodeGenerator::TypeScript);
    }

    #[test]
    fn explicit_path_wins() {
        assert_eq!(
            config_path(Some(PathBuf::from("custom.toml"))),
            PathBuf::from("custom.toml")
        );
    }

    #[test]
    fn missing_config_file() {
        let err = get_config(Path::new("definitely/not/here/sqlgen.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
