pub mod conversation;
pub mod dialog;
#[cfg(test)]
pub mod mock;

use crate::forms::ListParams;
use crate::models::{Conversation, Dialog, ListRow};
use crate::services::Scope;
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Read access to the thread and conversation relations.
///
/// One value serves one request; calls are issued sequentially.
#[async_trait]
pub trait ChatStore: Send {
    async fn count(&mut self, scope: &Scope, keyword: Option<&str>) -> Result<i64, StoreError>;

    async fn page(&mut self, scope: &Scope, params: &ListParams)
        -> Result<Vec<ListRow>, StoreError>;

    /// Conversation rows with this id, newest first.
    async fn conversations_by_id(&mut self, id: &str) -> Result<Vec<Conversation>, StoreError>;

    /// Conversation rows linked to a thread, newest first.
    async fn conversations_by_dialog(
        &mut self,
        dialog_id: &str,
    ) -> Result<Vec<Conversation>, StoreError>;

    /// Thread rows with this id, newest first.
    async fn dialogs_by_id(&mut self, id: &str) -> Result<Vec<Dialog>, StoreError>;
}

/// A [`ChatStore`] holding one pooled Postgres connection. The connection
/// goes back to the pool when the store is dropped, on every exit path.
pub struct PgStore {
    conn: PoolConnection<Postgres>,
}

impl PgStore {
    pub async fn acquire(pool: &PgPool) -> Result<Self, StoreError> {
        let conn = pool.acquire().await.map_err(|err| {
            tracing::error!("Failed to acquire a connection: {:?}", err);
            StoreError::from(err)
        })?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl ChatStore for PgStore {
    async fn count(&mut self, scope: &Scope, keyword: Option<&str>) -> Result<i64, StoreError> {
        match scope {
            Scope::Owner(tenant_id) => dialog::count_by_tenant(&mut self.conn, tenant_id, keyword).await,
            Scope::Global => conversation::count(&mut self.conn, keyword).await,
        }
    }

    async fn page(
        &mut self,
        scope: &Scope,
        params: &ListParams,
    ) -> Result<Vec<ListRow>, StoreError> {
        match scope {
            Scope::Owner(tenant_id) => dialog::page_by_tenant(&mut self.conn, tenant_id, params).await,
            Scope::Global => conversation::page(&mut self.conn, params).await,
        }
    }

    async fn conversations_by_id(&mut self, id: &str) -> Result<Vec<Conversation>, StoreError> {
        conversation::fetch_by_id(&mut self.conn, id).await
    }

    async fn conversations_by_dialog(
        &mut self,
        dialog_id: &str,
    ) -> Result<Vec<Conversation>, StoreError> {
        conversation::fetch_by_dialog(&mut self.conn, dialog_id).await
    }

    async fn dialogs_by_id(&mut self, id: &str) -> Result<Vec<Dialog>, StoreError> {
        dialog::fetch_by_id(&mut self.conn, id).await
    }
}

/// Escapes LIKE metacharacters so the keyword matches literally, then wraps
/// it for a substring match.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
