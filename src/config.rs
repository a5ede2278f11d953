//! Service configuration
//!
//! Connection settings are collected once at startup (flags or environment)
//! and handed around as an explicit struct; modules never consult the process
//! environment themselves.

/// Runtime configuration for the server and worker binaries
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Document store connection URL
    pub mongodb_url: String,
    /// Notification bus connection URL
    pub redis_url: String,
    /// Database used when a request omits `db_name`
    pub default_db: String,
    /// Queue (Redis list) the worker pops jobs from
    pub job_queue: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            mongodb_url: "mongodb://localhost:27017".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            default_db: "docrelay".to_string(),
            job_queue: "docrelay:jobs".to_string(),
        }
    }
}
