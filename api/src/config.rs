use anyhow::Result;
use rag_system::OpenAiConfig;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::path::PathBuf;

pub const PORT: u16 = 3000;
pub const DB_PORT: u16 = 5432;
pub const DB_USER: &str = "postgres";
pub const DB_NAME: &str = "postgres";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub password: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            password: env::var("DB_PASSWORD").unwrap_or_default(),
        }
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(DB_PORT)
            .username(DB_USER)
            .password(&self.password)
            .database(DB_NAME)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai: OpenAiConfig,
    pub database: DatabaseConfig,
    pub port: u16,
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openai: OpenAiConfig::from_env()?,
            database: DatabaseConfig::from_env(),
            port: PORT,
            public_dir: default_public_dir(),
        })
    }
}

pub fn default_public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}
