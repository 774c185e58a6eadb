/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "build-settings.txt";

/// Environment variable that overrides [`DEFAULT_CONFIG_FILE`].
pub const CONFIG_ENV_VAR: &str = "CUCUMBER_CONFIG";

pub const DEFAULT_OUT_FILE: &str = "ready_build.js";

pub const DEFAULT_EXTENSION: &str = ".js";

/// First element of `modules` that switches the build into discovery mode.
pub const SEARCH_SENTINEL: &str = "search";
