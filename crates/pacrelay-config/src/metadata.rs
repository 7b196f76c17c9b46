use serde::{Deserialize, Serialize};

/// Constant package metadata written into every generated database entry.
///
/// Install-path templates may use `{version}`, which is replaced by the
/// package version with the reserved separator turned into `.`, and `{name}`,
/// which is replaced by the package base name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Metadata {
    /// Package description (`%DESC%`).
    pub description: String,

    /// Upstream project URL (`%URL%`).
    pub url: String,

    /// License identifier (`%LICENSE%`).
    pub license: String,

    /// Package group (`%GROUPS%`), empty for none.
    pub groups: String,

    /// Hard dependencies, one per line in `%DEPENDS%` and the `depends` member.
    pub depends: Vec<String>,

    /// Advisory optional dependency (`%OPTDEPENDS%`).
    pub optdepends: String,

    /// `%CONFLICTS%` value, empty for none.
    pub conflicts: String,

    /// `%REPLACES%` value, empty for none.
    pub replaces: String,

    /// `%PACKAGER%` value.
    pub packager: String,

    /// Character in versions that maps to `.` in install paths.
    pub version_separator: char,

    /// Install paths listed for every package.
    pub files: Vec<String>,

    /// Extra top-level paths listed only for the default variant.
    pub default_files: Vec<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            description: "The Linux kernel and modules".to_string(),
            url: "https://www.kernel.org".to_string(),
            license: "GPL-2.0-only".to_string(),
            groups: String::new(),
            depends: vec!["linux-firmware".to_string()],
            optdepends: "wireless-regdb: to set the correct wireless channels of your country"
                .to_string(),
            conflicts: String::new(),
            replaces: String::new(),
            packager: "pacrelay <pacrelay@localhost>".to_string(),
            version_separator: '_',
            files: vec![
                "/usr/lib/modules/{version}/vmlinuz".to_string(),
                "/usr/lib/modules/{version}/pkgbase".to_string(),
            ],
            default_files: vec!["/usr/".to_string(), "/usr/lib/".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let metadata: Metadata = toml::from_str(
            r#"
            license = "MIT"
            depends = []
            "#,
        )
        .unwrap();

        assert_eq!(metadata.license, "MIT");
        assert!(metadata.depends.is_empty());
        assert_eq!(metadata.version_separator, '_');
        assert_eq!(metadata.files.len(), 2);
    }
}
