use std::env;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct HaloConfig {
    pub api_key: String,
    pub api_secret: String,
    pub api_host: String,
    pub describe_threads: usize,
    pub critical_only: bool,
}

impl HaloConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            api_key: env::var("HALO_API_KEY")?,
            api_secret: env::var("HALO_API_SECRET")?,
            api_host: env::var("HALO_API_HOST")
                .unwrap_or_else(|_| "api.cloudpassage.com".to_string()),
            describe_threads: env::var("HALO_DESCRIBE_THREADS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            critical_only: env::var("HALO_CRITICAL_ONLY")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        })
    }
}
