use serde::Deserialize;

/// Configuration options for the catalog server.
#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Key used to sign flash-message cookies; must be at least 64 bytes.
    /// A random key is generated when absent.
    #[serde(default)]
    pub secret_key: Option<String>,
}

fn default_database_url() -> String {
    "catalog.db".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}
