use crate::db::PgStore;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{MessageRetrievalEngine, Retrieval};
use crate::views::MessageList;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// GET /api/v1/conversations/{id}/messages
/// Returns the normalized message list of a conversation.
#[tracing::instrument(name = "Get conversation messages.", skip(user, pg_pool, engine))]
#[get("/{id}/messages")]
pub async fn messages_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
    engine: web::Data<MessageRetrievalEngine>,
) -> Result<impl Responder> {
    let conversation_id = path.into_inner().0;
    tracing::debug!("Requested by {}", user.username);

    let retrieval = match PgStore::acquire(pg_pool.get_ref()).await {
        Ok(mut store) => engine.get(&mut store, &conversation_id).await,
        Err(_) => Retrieval::NotFound,
    };

    match retrieval {
        Retrieval::Found { detail, messages } => Ok(JsonResponse::build()
            .set_data(MessageList {
                total: messages.len(),
                list: messages,
                conversation: detail,
            })
            .ok("OK")),
        Retrieval::NotFound => Err(JsonResponse::not_found(format!(
            "Conversation {} not found",
            conversation_id
        ))),
    }
}
