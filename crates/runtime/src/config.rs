pub const PROGRAM_NAME: &str = "trawl";

/// Environment variable that controls the stderr log level.
pub const PROGRAM_LOG_LEVEL: &str = "TRAWL_LOG_LEVEL";
