use std::fmt;

use chrono::{DateTime, Utc};
use pacrelay_config::package::DEFAULT_VARIANT;

/// Build flavour of a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Variant {
    Default,
    Named(String),
}

impl Variant {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => DEFAULT_VARIANT,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A release asset recognised as a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Configured logical name the asset matched, without variant suffix.
    pub name: String,
    /// Package name as installed; `<name>-<variant>` for named variants.
    pub base_name: String,
    pub variant: Variant,
    pub version: String,
    pub architecture: String,
    pub filename: String,
    pub size: u64,
    pub download_url: String,
    pub published_at: DateTime<Utc>,
    pub release_tag: String,
}

impl PackageRecord {
    /// Directory holding this package's members inside the database.
    pub fn entry_dir(&self) -> String {
        format!("{}-{}-{}", self.base_name, self.version, self.architecture)
    }

    /// Member path `<base_name>-<version>-<architecture>/<member>`.
    pub fn entry_path(&self, member: &str) -> String {
        format!("{}/{}", self.entry_dir(), member)
    }

    /// Version with `separator` replaced by `.`, as used in install paths.
    pub fn dotted_version(&self, separator: char) -> String {
        self.version.replace(separator, ".")
    }

    /// Publication time as whole epoch seconds, clamped at zero.
    pub fn build_date(&self) -> u64 {
        self.published_at.timestamp().max(0) as u64
    }
}


#[cfg(test)]
mod tests {
    use super::{fixtures::record, *};

    #[test]
    fn test_variant_display() {
        assert_eq!(Variant::Default.to_string(), "default");
        assert_eq!(Variant::Named("zen".into()).to_string(), "zen");
        assert!(Variant::Default.is_default());
        assert!(!Variant::Named("rt".into()).is_default());
    }

    #[test]
    fn test_entry_path() {
        let pkg = record(Some("zen"), "6.6.1_liquid-2", (2024, 1, 1));
        assert_eq!(
            pkg.entry_path("desc"),
            "linux-upstream-zen-6.6.1_liquid-2-x86_64/desc"
        );
    }

    #[test]
    fn test_dotted_version() {
        let pkg = record(None, "6.6.1_liquid-2", (2024, 1, 1));
        assert_eq!(pkg.dotted_version('_'), "6.6.1.liquid-2");
    }

    #[test]
    fn test_build_date() {
        let pkg = record(None, "6.6.1_liquid-2", (2024, 1, 1));
        assert_eq!(pkg.build_date(), 1_704_067_200);
    }
}
