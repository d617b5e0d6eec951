// =============================================================================
// Application Identity
// =============================================================================

/// Application display name
pub const APP_TITLE: &str = "The Integral Urban Home API";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".urbanhome";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "urbanhome.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "URBANHOME_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "URBANHOME_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "URBANHOME_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "URBANHOME_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "URBANHOME_LOG";

// =============================================================================
// Environment Variables - Datasets
// =============================================================================

/// Air quality SQLite file (table `p_environ`)
pub const ENV_AIR_QUALITY_DB: &str = "URBANHOME_AIR_QUALITY_DB";

/// Solar SQLite file (table `sunpower`)
pub const ENV_SOLAR_DB: &str = "URBANHOME_SOLAR_DB";

/// Dark Sky SQLite file (table `darksky`)
pub const ENV_DARKSKY_DB: &str = "URBANHOME_DARKSKY_DB";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// SQLite
// =============================================================================

/// Connections per dataset pool
pub const SQLITE_MAX_CONNECTIONS: u32 = 4;

/// Busy timeout while a writer holds the file
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;
