use std::path::{Path, PathBuf};

/// XDG app name used for the global config directory.
pub const APP_NAME: &str = "snag";
/// Overrides the global config path when set.
pub const CONFIG_ENV_VAR: &str = "SNAG_CONFIG";

/// Project-local directory holding config and the reflection log.
pub const PROJECT_DIR_NAME: &str = ".snag";

/// Path to the user-level config: `$SNAG_CONFIG` or `~/.config/snag/config.toml`.
///
/// Returns None if the config directory cannot be determined
/// (e.g., no HOME in containers).
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR_NAME).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        previous: Option<std::ffi::OsString>,
    }

    impl EnvGuard {
        fn set(value: &str) -> Self {
            let previous = std::env::var_os(CONFIG_ENV_VAR);
            // SAFETY: serialized by #[serial]; no other thread reads the env concurrently.
            unsafe { std::env::set_var(CONFIG_ENV_VAR, value) };
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: serialized by #[serial].
            unsafe {
                match &self.previous {
                    Some(value) => std::env::set_var(CONFIG_ENV_VAR, value),
                    None => std::env::remove_var(CONFIG_ENV_VAR),
                }
            }
        }
    }

    #[test]
    fn test_project_config_path() {
        let path = project_config_path(Path::new("/work/app"));
        assert_eq!(path, PathBuf::from("/work/app/.snag/config.toml"));
    }

    #[test]
    #[serial]
    fn test_env_var_overrides_global_path() {
        let _guard = EnvGuard::set("/etc/snag/custom.toml");
        assert_eq!(
            global_config_path(),
            Some(PathBuf::from("/etc/snag/custom.toml"))
        );
    }

    #[test]
    #[serial]
    fn test_empty_env_var_falls_back_to_xdg() {
        let _guard = EnvGuard::set("");
        let path = global_config_path();
        if let Some(path) = path {
            assert!(path.ends_with("config.toml"));
            assert_ne!(path, PathBuf::from(""));
        }
    }
}
