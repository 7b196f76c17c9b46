use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{ConfigError, Result},
    metadata::Metadata,
    package::PackageRule,
    utils::{first_env, xdg_config_home},
};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PACRELAY_CONFIG";

/// Environment variables searched for a GitHub API token, in order.
pub const TOKEN_ENV: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_MAX_PACKAGES: usize = 3;
pub const DEFAULT_RELEASES_PER_PAGE: u8 = 30;

/// API token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Application's configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Repository name; databases are served as `<repository>.db` and
    /// `<repository>.files`.
    pub repository: String,

    /// GitHub project that publishes the packages, as `owner/repo`.
    pub project: String,

    /// Architectures accepted in asset names.
    pub architectures: Vec<String>,

    /// Number of newest packages kept in the databases.
    /// Default: 3
    pub max_packages: Option<usize>,

    /// Number of releases requested from the API.
    /// Default: 30
    pub releases_per_page: Option<u8>,

    /// Use each package's publication time as the archive member mtime
    /// instead of the build time.
    /// Default: false
    pub reproducible: Option<bool>,

    /// Base URL of the GitHub REST API.
    /// Default: "https://api.github.com"
    pub api_url: Option<String>,

    /// HTTP timeout in seconds.
    pub timeout: Option<u64>,

    /// Package naming rules, tried in order.
    pub packages: Vec<PackageRule>,

    /// Constant metadata for the generated entries.
    #[serde(default)]
    pub metadata: Metadata,

    #[serde(skip)]
    pub token: Option<Token>,
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            repository: "linux-upstream".to_string(),
            project: "pacrelay/linux-upstream".to_string(),
            architectures: vec!["x86_64".to_string()],
            max_packages: Some(DEFAULT_MAX_PACKAGES),
            releases_per_page: Some(DEFAULT_RELEASES_PER_PAGE),
            reproducible: Some(false),
            api_url: None,
            timeout: None,
            packages: vec![PackageRule::new("linux-upstream").with_variants(["zen", "rt", "lts"])],
            metadata: Metadata::default(),
            token: None,
        }
    }

    /// Resolves where the configuration file lives.
    ///
    /// An explicit path wins, then `$PACRELAY_CONFIG`, then
    /// `$XDG_CONFIG_HOME/pacrelay/config.toml`.
    pub fn path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => xdg_config_home().join("pacrelay").join("config.toml"),
        }
    }

    /// Loads the configuration from `path`, falling back to the default
    /// configuration when the file does not exist. The token is read from the
    /// environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loading config from {}", path.display());
                toml::from_str(&content)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Config file {} not found, using defaults",
                    path.display()
                );
                Self::default_config()
            }
            Err(source) => {
                return Err(ConfigError::IoError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        config.token = first_env(&TOKEN_ENV).map(Token::new);
        config.resolve()?;

        Ok(config)
    }

    /// Validates the configuration and fills in defaults.
    pub fn resolve(&mut self) -> Result<()> {
        let valid_project = self
            .project
            .split_once('/')
            .is_some_and(|(owner, repo)| {
                !owner.is_empty() && !repo.is_empty() && !repo.contains('/')
            });
        if !valid_project {
            return Err(ConfigError::InvalidProject(self.project.clone()));
        }

        let valid_repo = !self.repository.is_empty()
            && self
                .repository
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid_repo {
            return Err(ConfigError::InvalidRepository(self.repository.clone()));
        }

        if self.architectures.is_empty() {
            return Err(ConfigError::NoArchitectures);
        }
        if let Some(bad) = self
            .architectures
            .iter()
            .find(|a| a.is_empty() || !a.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        {
            return Err(ConfigError::InvalidArchitecture(bad.clone()));
        }

        if self.packages.is_empty() {
            return Err(ConfigError::NoPackages);
        }
        for rule in &self.packages {
            rule.validate()?;
        }

        if self.max_packages == Some(0) {
            return Err(ConfigError::ZeroMaxPackages);
        }
        self.max_packages.get_or_insert(DEFAULT_MAX_PACKAGES);
        self.releases_per_page
            .get_or_insert(DEFAULT_RELEASES_PER_PAGE);
        self.reproducible.get_or_insert(false);

        Ok(())
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Token::new(token));
        self
    }

    pub fn max_packages(&self) -> usize {
        self.max_packages.unwrap_or(DEFAULT_MAX_PACKAGES)
    }

    pub fn releases_per_page(&self) -> u8 {
        self.releases_per_page
            .unwrap_or(DEFAULT_RELEASES_PER_PAGE)
            .clamp(1, 100)
    }

    pub fn reproducible(&self) -> bool {
        self.reproducible.unwrap_or(false)
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::test_utils::with_env;

    #[test]
    fn test_default_config_creation() {
        let mut config = Config::default_config();

        assert_eq!(config.repository, "linux-upstream");
        assert_eq!(config.max_packages(), 3);
        assert_eq!(config.architectures, vec!["x86_64"]);
        assert!(!config.reproducible());
        assert!(config.resolve().is_ok());
    }

    #[test]
    fn test_resolve_invalid_project() {
        let mut config = Config::default_config();
        config.project = "no-slash".to_string();
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::InvalidProject(_))
        ));

        config.project = "a/b/c".to_string();
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::InvalidProject(_))
        ));
    }

    #[test]
    fn test_resolve_invalid_repository() {
        let mut config = Config::default_config();
        config.repository = "bad name".to_string();
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::InvalidRepository(_))
        ));
    }

    #[test]
    fn test_resolve_no_architectures() {
        let mut config = Config::default_config();
        config.architectures.clear();
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::NoArchitectures)
        ));
    }

    #[test]
    fn test_resolve_invalid_architecture() {
        let mut config = Config::default_config();
        config.architectures = vec!["x86_64".into(), "arm-v7".into()];
        match config.resolve() {
            Err(ConfigError::InvalidArchitecture(arch)) => assert_eq!(arch, "arm-v7"),
            other => panic!("expected InvalidArchitecture, got {other:?}"),
        }

        config.architectures = vec![String::new()];
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::InvalidArchitecture(_))
        ));
    }

    #[test]
    fn test_resolve_zero_max_packages() {
        let mut config = Config::default_config();
        config.max_packages = Some(0);
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::ZeroMaxPackages)
        ));
    }

    #[test]
    fn test_resolve_fills_defaults() {
        let mut config = Config::default_config();
        config.max_packages = None;
        config.releases_per_page = None;
        config.reproducible = None;
        config.resolve().unwrap();

        assert_eq!(config.max_packages, Some(3));
        assert_eq!(config.releases_per_page, Some(30));
        assert_eq!(config.reproducible, Some(false));
    }

    #[test]
    fn test_api_url_trailing_slash() {
        let mut config = Config::default_config();
        config.api_url = Some("https://ghe.example.com/api/v3/".to_string());
        assert_eq!(config.api_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let config = Config::default_config().with_token("ghp_secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("Token(***)"));
    }

    #[test]
    fn test_toml_round_trip_skips_token() {
        let config = Config::default_config().with_token("ghp_secret");
        let content = config.to_toml().unwrap();
        assert!(!content.contains("ghp_secret"));

        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.project, config.project);
        assert_eq!(parsed.packages, config.packages);
        assert_eq!(parsed.metadata, config.metadata);
        assert!(parsed.token.is_none());
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
repository = "kernels"
project = "octo/kernels"
architectures = ["x86_64", "aarch64"]
max_packages = 5

[[packages]]
name = "linux-custom"
variants = ["hardened"]

[metadata]
license = "GPL-2.0-or-later"
"#
        )
        .unwrap();

        with_env(
            vec![("GITHUB_TOKEN", Some("abc")), ("GH_TOKEN", None)],
            || {
                let config = Config::load(file.path()).unwrap();
                assert_eq!(config.repository, "kernels");
                assert_eq!(config.max_packages(), 5);
                assert_eq!(config.packages[0].variants, vec!["hardened"]);
                assert_eq!(config.metadata.license, "GPL-2.0-or-later");
                assert_eq!(config.metadata.depends, vec!["linux-firmware"]);
                assert_eq!(config.token.as_ref().map(Token::expose), Some("abc"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        with_env(vec![("GITHUB_TOKEN", None), ("GH_TOKEN", None)], || {
            let config = Config::load(dir.path().join("absent.toml")).unwrap();
            assert_eq!(config.repository, "linux-upstream");
            assert!(config.token.is_none());
        });
    }

    #[test]
    #[serial]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "repository = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::TomlDeError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_path_resolution() {
        let explicit = PathBuf::from("/srv/pacrelay.toml");
        assert_eq!(Config::path(Some(&explicit)), explicit);

        with_env(vec![(CONFIG_ENV, Some("/etc/pacrelay.toml"))], || {
            assert_eq!(Config::path(None), PathBuf::from("/etc/pacrelay.toml"));
        });

        with_env(
            vec![(CONFIG_ENV, None), ("XDG_CONFIG_HOME", Some("/cfg"))],
            || {
                assert_eq!(
                    Config::path(None),
                    PathBuf::from("/cfg/pacrelay/config.toml")
                );
            },
        );
    }
}
