use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::authz::{PipelineRepository, UserRepository};
use crate::models::pipeline::Pipeline;
use crate::models::token::Token;
use crate::models::user::{Identity, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PipelineRow {
    id: i64,
    scm_uri: String,
}

#[derive(sqlx::FromRow)]
struct TokenRow {
    id: i64,
    name: String,
    description: Option<String>,
    last_used: Option<DateTime<Utc>>,
    user_id: i64,
    pipeline_id: i64,
    metadata: Option<Value>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    scm_context: String,
}

impl From<TokenRow> for Token {
    fn from(row: TokenRow) -> Self {
        // Provider-specific annotations live in a JSONB column; they ride
        // along in `extra` so sanitization passes them through unchanged.
        let extra = match row.metadata {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Token {
            id: row.id,
            name: row.name,
            description: row.description,
            last_used: row.last_used,
            user_id: row.user_id,
            pipeline_id: row.pipeline_id,
            extra,
        }
    }
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Fetch a pipeline with its token collection materialized, ordered by
    /// token id so repeated reads of unchanged state list identically.
    pub async fn get_pipeline(&self, id: i64) -> anyhow::Result<Option<Pipeline>> {
        let row = sqlx::query_as::<_, PipelineRow>(
            "SELECT id, scm_uri FROM pipelines WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let tokens = sqlx::query_as::<_, TokenRow>(
            "SELECT id, name, description, last_used, user_id, pipeline_id, metadata \
             FROM tokens WHERE pipeline_id = $1 ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Pipeline {
            id: row.id,
            scm_uri: row.scm_uri,
            tokens: tokens.into_iter().map(Token::from).collect(),
        }))
    }

    pub async fn get_user(&self, username: &str, scm_context: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, scm_context FROM users \
             WHERE username = $1 AND scm_context = $2",
        )
        .bind(username)
        .bind(scm_context)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| User {
            id: r.id,
            username: r.username,
            scm_context: r.scm_context,
        }))
    }
}

#[async_trait]
impl PipelineRepository for PgStore {
    async fn get(&self, id: i64) -> anyhow::Result<Option<Pipeline>> {
        self.get_pipeline(id).await
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn get(&self, identity: &Identity) -> anyhow::Result<Option<User>> {
        self.get_user(&identity.username, &identity.scm_context).await
    }
}
