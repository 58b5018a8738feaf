use crate::configuration::QuerySettings;
use crate::db::{ChatStore, StoreError};
use crate::forms::ListParams;
use crate::models::{self, Conversation, ListRow, MessageLog};
use crate::services::latest::{latest, truncate_preview};
use crate::services::Scope;
use crate::views::ConversationView;

#[derive(Debug, Default)]
pub struct ConversationPage {
    pub items: Vec<ConversationView>,
    pub total: i64,
}

/// Paginated, keyword-filtered conversation listing.
///
/// Per request: one count query, one page query, then one follow-up per row
/// for its newest conversation record.
#[derive(Debug, Clone)]
pub struct ConversationQueryEngine {
    settings: QuerySettings,
}

impl ConversationQueryEngine {
    pub fn new(settings: QuerySettings) -> Self {
        Self { settings }
    }

    /// Lists a page. Storage failures are logged and reported as an empty
    /// page with a zero total.
    #[tracing::instrument(name = "List conversations", skip(self, store))]
    pub async fn list<S>(&self, store: &mut S, scope: &Scope, params: &ListParams) -> ConversationPage
    where
        S: ChatStore + ?Sized,
    {
        match self.try_list(store, scope, params).await {
            Ok(page) => page,
            Err(err) => {
                tracing::error!("Failed to list conversations: {:?}", err);
                ConversationPage::default()
            }
        }
    }

    pub async fn try_list<S>(
        &self,
        store: &mut S,
        scope: &Scope,
        params: &ListParams,
    ) -> Result<ConversationPage, StoreError>
    where
        S: ChatStore + ?Sized,
    {
        // counted independently of the page, so the total does not depend on LIMIT/OFFSET
        let total = store.count(scope, params.keyword.as_deref()).await?;
        let rows = store.page(scope, params).await?;
        tracing::debug!("Fetched {} of {} rows", rows.len(), total);

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let newest = match scope {
                Scope::Owner(_) => store.conversations_by_dialog(&row.id).await?,
                Scope::Global => store.conversations_by_id(&row.id).await?,
            }
            .into_iter()
            .next();
            items.push(self.view(scope, row, newest));
        }

        Ok(ConversationPage { items, total })
    }

    fn view(&self, scope: &Scope, row: ListRow, newest: Option<Conversation>) -> ConversationView {
        let mut name = row.name.unwrap_or_default();
        let mut latest_message = String::new();

        if let Some(conversation) = newest {
            if let Some(conversation_name) = conversation.name.filter(|n| !n.is_empty()) {
                name = conversation_name;
            }
            latest_message = latest(&MessageLog::from(conversation.message.as_deref()));
        }

        let mut view = ConversationView {
            create_time: models::format_time(row.create_date),
            update_time: models::format_time(row.update_date),
            ..Default::default()
        };

        if scope.is_global() {
            if latest_message.is_empty() {
                latest_message = if name.is_empty() {
                    format!("Conversation {}", row.id)
                } else {
                    name.clone()
                };
            }
            view.content = Some(truncate_preview(
                &latest_message,
                self.settings.search_preview_chars,
            ));
            view.tenant_id = Some(row.owner.unwrap_or_default());
        }

        view.latest_message = truncate_preview(&latest_message, self.settings.list_preview_chars);
        view.id = row.id;
        view.name = name;
        view
    }
}
