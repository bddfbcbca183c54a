use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const INSERT_QUESTION_RESPONSE: &str =
    "INSERT INTO public.questions_responses(question, response) VALUES($1, $2)";

// Sink for answered questions.
#[async_trait]
pub trait ResponseLog: Send + Sync {
    async fn record(&self, question: &str, response: &str) -> Result<()>;
}

pub struct PgResponseLog {
    pool: PgPool,
}

impl PgResponseLog {
    // Builds the pool without connecting; the first insert opens a connection.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        log::info!("Using database at {}:{}", config.host, crate::config::DB_PORT);
        Self::with_options(config.connect_options(), ACQUIRE_TIMEOUT)
    }

    pub fn with_options(options: PgConnectOptions, acquire_timeout: Duration) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);
        Self { pool }
    }
}

#[async_trait]
impl ResponseLog for PgResponseLog {
    async fn record(&self, question: &str, response: &str) -> Result<()> {
        sqlx::query(INSERT_QUESTION_RESPONSE)
            .bind(question)
            .bind(response)
            .execute(&self.pool)
            .await
            .context("failed to insert question/response")?;
        Ok(())
    }
}
