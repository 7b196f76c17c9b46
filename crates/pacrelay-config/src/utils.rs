use std::{env, path::PathBuf};

/// Returns the user's home directory, `/` when `HOME` is unset.
pub fn home_dir() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Returns the user's config directory following the XDG Base Directory
/// Specification.
///
/// This checks the `XDG_CONFIG_HOME` environment variable. If not set, it
/// defaults to `$HOME/.config`.
pub fn xdg_config_home() -> PathBuf {
    env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Reads the first non-empty environment variable out of `keys`.
pub fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::test_utils::with_env;

    #[test]
    #[serial]
    fn test_xdg_config_home_from_env() {
        with_env(vec![("XDG_CONFIG_HOME", Some("/tmp/xdg"))], || {
            assert_eq!(xdg_config_home(), PathBuf::from("/tmp/xdg"));
        });
    }

    #[test]
    #[serial]
    fn test_xdg_config_home_fallback() {
        with_env(
            vec![("XDG_CONFIG_HOME", None), ("HOME", Some("/home/builder"))],
            || {
                assert_eq!(xdg_config_home(), PathBuf::from("/home/builder/.config"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_first_env_skips_blank() {
        with_env(
            vec![
                ("PACRELAY_TEST_A", Some("  ")),
                ("PACRELAY_TEST_B", Some("token")),
            ],
            || {
                assert_eq!(
                    first_env(&["PACRELAY_TEST_A", "PACRELAY_TEST_B"]),
                    Some("token".to_string())
                );
            },
        );
    }
}
