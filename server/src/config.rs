/// Uniqueness scope for company names. `Global` preserves the historical
/// system-wide constraint; `Owner` scopes it to the record's creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyNameScope {
    Global,
    Owner,
}

impl CompanyNameScope {
    fn parse(s: &str) -> Self {
        match s {
            "global" => Self::Global,
            "owner" => Self::Owner,
            other => panic!("invalid COMPANY_NAME_SCOPE: {other:?} (expected global|owner)"),
        }
    }
}

/// Tracker service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ServerConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `SERVER_PORT`.
    pub server_port: u16,
    /// Company-name uniqueness scope (default global). Env var: `COMPANY_NAME_SCOPE`.
    pub company_name_scope: CompanyNameScope,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            company_name_scope: std::env::var("COMPANY_NAME_SCOPE")
                .ok()
                .map(|v| CompanyNameScope::parse(&v))
                .unwrap_or(CompanyNameScope::Global),
        }
    }
}
