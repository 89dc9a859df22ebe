use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Base URL of the SCM provider's REST API.
    pub scm_base_url: String,
    /// Bearer token for the SCM API, if the provider requires one.
    pub scm_api_token: Option<String>,
    /// Per-request timeout for SCM calls, in seconds.
    /// Set via CONVEYOR_SCM_TIMEOUT_SECS. Default: 10.
    pub scm_timeout_secs: u64,
    /// Shared secret for validating caller JWTs (HS256).
    pub jwt_secret: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let jwt_secret = std::env::var("CONVEYOR_JWT_SECRET")
        .unwrap_or_else(|_| "CHANGE_ME_INSECURE_DEV_SECRET".into());

    if jwt_secret == "CHANGE_ME_INSECURE_DEV_SECRET" {
        let env_mode = std::env::var("CONVEYOR_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "CONVEYOR_JWT_SECRET is still the insecure placeholder. \
                 Set a proper secret before running in production."
            );
        }
        eprintln!("⚠️  CONVEYOR_JWT_SECRET is not set — using insecure placeholder.");
    }

    Ok(Config {
        port: std::env::var("CONVEYOR_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .unwrap_or(8080),
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/conveyor".into()),
        scm_base_url: std::env::var("CONVEYOR_SCM_BASE_URL")
            .unwrap_or_else(|_| "https://api.github.com".into()),
        scm_api_token: std::env::var("CONVEYOR_SCM_API_TOKEN").ok(),
        scm_timeout_secs: std::env::var("CONVEYOR_SCM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10),
        jwt_secret,
    })
}
