use crate::configuration::Settings;
use crate::db::PgStore;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{ConversationPage, ConversationQueryEngine, Scope};
use crate::views::ListPayload;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// GET /api/v1/conversations?user_id=&page=&size=&sort_by=&sort_order=&keyword=
/// Lists the conversations of `user_id`, or searches all of them when it is omitted.
#[tracing::instrument(name = "List conversations.", skip(user, pg_pool, engine, settings))]
#[get("")]
pub async fn list_handler(
    user: web::ReqData<Arc<models::User>>,
    query: web::Query<forms::ListQuery>,
    pg_pool: web::Data<PgPool>,
    engine: web::Data<ConversationQueryEngine>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let query = query.into_inner();
    let scope = Scope::resolve(query.user_id.as_deref());
    tracing::debug!("Requested by {}", user.username);
    respond(query, scope, pg_pool.get_ref(), engine.get_ref(), &settings).await
}

/// GET /api/v1/users/{user_id}/conversations?page=&size=&sort_by=&sort_order=&keyword=
#[tracing::instrument(name = "List conversations of user.", skip(user, pg_pool, engine, settings))]
#[get("/{user_id}/conversations")]
pub async fn user_list_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(String,)>,
    query: web::Query<forms::ListQuery>,
    pg_pool: web::Data<PgPool>,
    engine: web::Data<ConversationQueryEngine>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let user_id = path.into_inner().0;
    let scope = Scope::resolve(Some(&user_id));
    tracing::debug!("Requested by {}", user.username);
    respond(query.into_inner(), scope, pg_pool.get_ref(), engine.get_ref(), &settings).await
}

async fn respond(
    query: forms::ListQuery,
    scope: Scope,
    pg_pool: &PgPool,
    engine: &ConversationQueryEngine,
    settings: &Settings,
) -> Result<web::Json<JsonResponse<ListPayload<crate::views::ConversationView>>>> {
    let params = query
        .into_params(&settings.query)
        .map_err(|err| JsonResponse::bad_request(err.to_string()))?;

    let page = match PgStore::acquire(pg_pool).await {
        Ok(mut store) => engine.list(&mut store, &scope, &params).await,
        Err(_) => ConversationPage::default(),
    };

    tracing::info!(
        "Listed {} of {} conversations ({:?})",
        page.items.len(),
        page.total,
        scope
    );

    Ok(JsonResponse::build()
        .set_data(ListPayload {
            list: page.items,
            total: page.total,
        })
        .ok("OK"))
}
