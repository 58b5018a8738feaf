use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub auth: AuthSettings,
    #[serde(default)]
    pub query: QuerySettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    pub admin_username: String,
    pub admin_password: String,
}

/// Paging limits, preview lengths and the sort allowlist handed to the query engine.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub list_preview_chars: usize,
    pub search_preview_chars: usize,
    pub sort_columns: Vec<String>,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            list_preview_chars: 100,
            search_preview_chars: 200,
            sort_columns: vec![
                "create_time".to_string(),
                "update_time".to_string(),
                "name".to_string(),
                "id".to_string(),
            ],
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_token_ttl_secs() -> i64 {
    3600
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // configuration.yaml first, then APP__SECTION__KEY overrides
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}
