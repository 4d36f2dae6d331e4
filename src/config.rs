use serde::Deserialize;

/// Default cap on `/upload` request bodies (64 MiB)
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 64 * 1024 * 1024;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Library CSV loaded at startup
    #[serde(default = "default_library_path")]
    pub library_path: String,

    /// Directory where uploaded files are staged before loading
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Largest accepted upload request body in bytes
    #[serde(default = "default_upload_max_bytes")]
    pub upload_max_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_library_path() -> String {
    "data/sample_library.csv".to_string()
}

fn default_upload_dir() -> String {
    std::env::temp_dir().to_string_lossy().into_owned()
}

fn default_upload_max_bytes() -> usize {
    DEFAULT_UPLOAD_MAX_BYTES
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
