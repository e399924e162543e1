
use std::env;
use std::path::Path;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and set ACCT_CONFIG_DIR
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set(crate::CONFIG_DIR_ENV, temp.path().to_str().unwrap());
    (temp, guard)
}

/// Write a config.toml into the config directory
pub(crate) fn write_config(dir: &Path, contents: &str) {
    std::fs::write(dir.join(crate::CONFIG_FILENAME), contents).unwrap();
}

/// Config TOML that passes validation once `service-account.json` exists
pub(crate) fn write_valid_firebase_setup(dir: &Path) {
    std::fs::write(dir.join("service-account.json"), "{}").unwrap();
    write_config(
        dir,
        r#"
            [firebase]
            credentials_path = "service-account.json"
            web_api_key = "test-web-api-key"
        "#,
    );
}
