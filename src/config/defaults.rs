//! Default values for configuration

/// Default HTTP bind address
pub fn default_bind_addr() -> String {
    std::env::var("HRMIGRATE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string())
}

/// Default request body limit (16 MiB)
pub fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

/// Default SQLite file name, relative to the base directory
pub fn default_db_file_name() -> String {
    "migration.db".to_string()
}

/// Default connection pool size
pub fn default_max_connections() -> u32 {
    5
}
