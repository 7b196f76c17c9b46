use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(pacrelay_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(pacrelay_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Failed to read config file {}", .path.display())]
    #[diagnostic(code(pacrelay_config::io))]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid project: {0}")]
    #[diagnostic(
        code(pacrelay_config::invalid_project),
        help("The project must be given as `owner/repo`")
    )]
    InvalidProject(String),

    #[error("Invalid repository name: {0}")]
    #[diagnostic(
        code(pacrelay_config::invalid_repository),
        help("Repository names may only contain ASCII letters, digits, `-`, `_` and `.`")
    )]
    InvalidRepository(String),

    #[error("No architectures configured")]
    #[diagnostic(
        code(pacrelay_config::no_architectures),
        help("Add at least one entry to `architectures`, e.g. \"x86_64\"")
    )]
    NoArchitectures,

    #[error("Invalid architecture: {0:?}")]
    #[diagnostic(
        code(pacrelay_config::invalid_architecture),
        help("Architectures may only contain ASCII letters, digits and `_`, e.g. \"x86_64\"")
    )]
    InvalidArchitecture(String),

    #[error("No packages configured")]
    #[diagnostic(
        code(pacrelay_config::no_packages),
        help("Add at least one [[packages]] table")
    )]
    NoPackages,

    #[error("Invalid package name: {0:?}")]
    #[diagnostic(
        code(pacrelay_config::invalid_package),
        help("Package and variant names must be non-empty ASCII")
    )]
    InvalidPackageName(String),

    #[error("max_packages must be greater than zero")]
    #[diagnostic(code(pacrelay_config::max_packages))]
    ZeroMaxPackages,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
