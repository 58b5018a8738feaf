use super::{ChatStore, StoreError};
use crate::forms::{ListParams, SortColumn, SortOrder};
use crate::models::{Conversation, Dialog, ListRow};
use crate::services::Scope;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// In-memory [`ChatStore`] mirroring the SQL semantics: case-insensitive
/// substring filter, `id` tie-breaker, LIMIT/OFFSET paging.
#[derive(Debug, Default)]
pub struct MockChatStore {
    pub dialogs: Vec<Dialog>,
    pub conversations: Vec<Conversation>,
    /// Every call fails with a connection error when set.
    pub broken: bool,
    pub queries: usize,
}

impl MockChatStore {
    pub fn new(dialogs: Vec<Dialog>, conversations: Vec<Conversation>) -> Self {
        Self {
            dialogs,
            conversations,
            ..Default::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    fn check(&mut self) -> Result<(), StoreError> {
        self.queries += 1;
        if self.broken {
            return Err(StoreError::Query(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn matching(&self, scope: &Scope, keyword: Option<&str>) -> Vec<ListRow> {
        let keyword = keyword.map(str::to_lowercase);
        let contains = |text: Option<&String>| match (&keyword, text) {
            (Some(k), Some(text)) => text.to_lowercase().contains(k.as_str()),
            _ => false,
        };

        match scope {
            Scope::Owner(tenant_id) => self
                .dialogs
                .iter()
                .filter(|d| d.tenant_id.as_deref() == Some(tenant_id.as_str()))
                .filter(|d| {
                    keyword.is_none()
                        || contains(d.name.as_ref())
                        || self
                            .conversations
                            .iter()
                            .filter(|c| c.dialog_id.as_deref() == Some(d.id.as_str()))
                            .any(|c| contains(c.message.as_ref()))
                })
                .map(|d| ListRow {
                    id: d.id.clone(),
                    name: d.name.clone(),
                    owner: d.tenant_id.clone(),
                    create_date: d.create_date,
                    update_date: d.update_date,
                })
                .collect(),
            Scope::Global => self
                .conversations
                .iter()
                .filter(|c| {
                    keyword.is_none() || contains(c.name.as_ref()) || contains(c.message.as_ref())
                })
                .map(|c| ListRow {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    owner: c.dialog_id.clone(),
                    create_date: c.create_date,
                    update_date: c.update_date,
                })
                .collect(),
        }
    }
}

fn newest_first<T, F>(mut rows: Vec<T>, created: F) -> Vec<T>
where
    F: Fn(&T) -> Option<NaiveDateTime>,
{
    rows.sort_by(|a, b| created(b).cmp(&created(a)));
    rows
}

#[async_trait]
impl ChatStore for MockChatStore {
    async fn count(&mut self, scope: &Scope, keyword: Option<&str>) -> Result<i64, StoreError> {
        self.check()?;
        Ok(self.matching(scope, keyword).len() as i64)
    }

    async fn page(
        &mut self,
        scope: &Scope,
        params: &ListParams,
    ) -> Result<Vec<ListRow>, StoreError> {
        self.check()?;
        let mut rows = self.matching(scope, params.keyword.as_deref());
        rows.sort_by(|a, b| {
            let primary = match params.sort_by {
                SortColumn::CreateTime => a.create_date.cmp(&b.create_date),
                SortColumn::UpdateTime => a.update_date.cmp(&b.update_date),
                SortColumn::Name => a.name.cmp(&b.name),
                SortColumn::Id => a.id.cmp(&b.id),
            };
            let primary = match params.sort_order {
                SortOrder::Asc => primary,
                SortOrder::Desc => primary.reverse(),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows
            .into_iter()
            .skip(params.offset as usize)
            .take(params.size as usize)
            .collect())
    }

    async fn conversations_by_id(&mut self, id: &str) -> Result<Vec<Conversation>, StoreError> {
        self.check()?;
        let rows = self
            .conversations
            .iter()
            .filter(|c| c.id == id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |c: &Conversation| c.create_date))
    }

    async fn conversations_by_dialog(
        &mut self,
        dialog_id: &str,
    ) -> Result<Vec<Conversation>, StoreError> {
        self.check()?;
        let rows = self
            .conversations
            .iter()
            .filter(|c| c.dialog_id.as_deref() == Some(dialog_id))
            .cloned()
            .collect();
        Ok(newest_first(rows, |c: &Conversation| c.create_date))
    }

    async fn dialogs_by_id(&mut self, id: &str) -> Result<Vec<Dialog>, StoreError> {
        self.check()?;
        let rows = self.dialogs.iter().filter(|d| d.id == id).cloned().collect();
        Ok(newest_first(rows, |d: &Dialog| d.create_date))
    }
}
