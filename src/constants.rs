//! Centralized constants for the store, generator, and display.

/// Default remote table holding credential rows.
pub const DEFAULT_TABLE: &str = "credentials";

/// Default per-request timeout for the hosted store.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// REST path prefix of the hosted data API.
pub const REST_PATH: &str = "/rest/v1";

/// Config directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "credman";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Permission mode for the config file (it holds the client key).
pub const CONFIG_FILE_MODE: u32 = 0o600;

/// Length of generated passwords.
pub const GENERATED_PASSWORD_LENGTH: usize = 16;

/// Alphabet for generated passwords: 26 lowercase, 26 uppercase, 10 digits, 8 symbols.
pub const PASSWORD_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Placeholder shown instead of a password until revealed.
pub const PASSWORD_MASK: &str = "••••••••";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "CREDMAN_LOG";
