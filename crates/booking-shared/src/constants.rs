//! Application-wide constants

pub const DEFAULT_APP_NAME: &str = "schema-init";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 2;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 0;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Advisory lock key shared by every replica running schema initialization.
/// ASCII "bookschm" read as a big-endian i64.
pub const DEFAULT_SCHEMA_LOCK_KEY: i64 = 0x626f_6f6b_7363_686d;
