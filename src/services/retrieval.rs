use crate::db::{ChatStore, StoreError};
use crate::models::{Message, MessageLog};
use crate::services::normalizer::normalize;
use crate::views::ConversationDetail;

#[derive(Debug, PartialEq)]
pub enum Retrieval {
    Found {
        detail: ConversationDetail,
        messages: Vec<Message>,
    },
    NotFound,
}

impl Retrieval {
    /// Number of normalized messages; zero when nothing was found.
    pub fn count(&self) -> usize {
        match self {
            Self::Found { messages, .. } => messages.len(),
            Self::NotFound => 0,
        }
    }
}

/// Resolves a conversation id and returns its full, normalized message list.
#[derive(Debug, Clone, Default)]
pub struct MessageRetrievalEngine;

impl MessageRetrievalEngine {
    pub fn new() -> Self {
        Self
    }

    /// Storage failures are logged and reported as [`Retrieval::NotFound`].
    #[tracing::instrument(name = "Get conversation messages", skip(self, store))]
    pub async fn get<S>(&self, store: &mut S, conversation_id: &str) -> Retrieval
    where
        S: ChatStore + ?Sized,
    {
        match self.try_get(store, conversation_id).await {
            Ok(retrieval) => retrieval,
            Err(err) => {
                tracing::error!("Failed to load conversation {}: {:?}", conversation_id, err);
                Retrieval::NotFound
            }
        }
    }

    pub async fn try_get<S>(
        &self,
        store: &mut S,
        conversation_id: &str,
    ) -> Result<Retrieval, StoreError>
    where
        S: ChatStore + ?Sized,
    {
        let detail = match self.resolve(store, conversation_id).await? {
            Some(detail) => detail,
            None => {
                tracing::info!("Conversation {} not found", conversation_id);
                return Ok(Retrieval::NotFound);
            }
        };

        let log = MessageLog::from(detail.message_log.as_deref());
        let messages = normalize(&log, conversation_id, &detail.create_time);
        tracing::debug!("Normalized {} messages", messages.len());

        Ok(Retrieval::Found { detail, messages })
    }

    // Ids passed in here are sometimes thread ids: historical data did not keep the
    // two id spaces apart, so the thread relation is consulted as a fallback.
    async fn resolve<S>(
        &self,
        store: &mut S,
        conversation_id: &str,
    ) -> Result<Option<ConversationDetail>, StoreError>
    where
        S: ChatStore + ?Sized,
    {
        if let Some(row) = store.conversations_by_id(conversation_id).await?.into_iter().next() {
            return Ok(Some(row.into()));
        }

        let dialog = match store.dialogs_by_id(conversation_id).await?.into_iter().next() {
            Some(dialog) => dialog,
            None => return Ok(None),
        };
        tracing::debug!("Id {} resolved as a dialog", conversation_id);

        match store.conversations_by_dialog(&dialog.id).await?.into_iter().next() {
            Some(row) => Ok(Some(row.into())),
            None => Ok(Some(dialog.into())),
        }
    }
}
