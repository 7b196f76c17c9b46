use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Suffix every package asset must carry unless a rule overrides it.
pub const DEFAULT_EXTENSION: &str = ".pkg.tar.zst";

/// Variant name for an asset that carries no flavour suffix.
pub const DEFAULT_VARIANT: &str = "default";

/// Describes one logical package published as release assets.
///
/// Assets are named `<name>[-<variant>]-<version>-<arch><extension>`, for
/// instance `linux-upstream-zen-6.6.1_liquid-2-x86_64.pkg.tar.zst`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageRule {
    /// Logical package name.
    pub name: String,

    /// Named build flavours. Each one is tried before the plain name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,

    /// Asset filename suffix.
    /// Default: ".pkg.tar.zst"
    pub extension: Option<String>,
}

impl PackageRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            extension: None,
        }
    }

    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !is_name_token(&self.name) {
            return Err(ConfigError::InvalidPackageName(self.name.clone()));
        }
        if let Some(bad) = self
            .variants
            .iter()
            .find(|v| !is_name_token(v) || v.as_str() == DEFAULT_VARIANT)
        {
            return Err(ConfigError::InvalidPackageName(bad.clone()));
        }
        if !self.extension().is_ascii() || self.extension().is_empty() {
            return Err(ConfigError::InvalidPackageName(self.extension().to_string()));
        }
        Ok(())
    }
}

fn is_name_token(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '@'))
}
