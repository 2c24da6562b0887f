/// Name of the environment variable containing the path to the GUS configuration file.
/// If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/gus/config.toml` or `$HOME/.config/gus/config.toml`
///  (2) on Windows: `%APPDATA%\gus\config.toml`
pub const ENV_CONFIG_PATH: &str = "GUS_CONFIG_PATH";

/// Directory holding the configuration file, relative to the platform config root.
pub const CONFIG_DIR_NAME: &str = "gus";

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Number of consecutive candidates backtested together in parallel mode.
pub const DEFAULT_BATCH_SIZE: usize = 4096;
