use crate::db::{like_pattern, StoreError};
use crate::forms::ListParams;
use crate::models::{Conversation, ListRow};
use sqlx::PgConnection;
use tracing::Instrument;

// $1 is the escaped keyword pattern
const KEYWORD_FILTER: &str =
    r" WHERE (c.name ILIKE $1 ESCAPE '\' OR c.message::text ILIKE $1 ESCAPE '\')";

const SELECT_CONVERSATION: &str = r#"SELECT id, dialog_id, name, message::text AS message, create_date, update_date
    FROM conversation"#;

pub async fn count(conn: &mut PgConnection, keyword: Option<&str>) -> Result<i64, StoreError> {
    let query_span = tracing::info_span!("Counting conversations");

    let mut sql = String::from("SELECT COUNT(*) FROM conversation c");
    if keyword.is_some() {
        sql.push_str(KEYWORD_FILTER);
    }

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    if let Some(keyword) = keyword {
        query = query.bind(like_pattern(keyword));
    }

    query
        .fetch_one(&mut *conn)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count conversations: {:?}", err);
            StoreError::from(err)
        })
}

pub async fn page(conn: &mut PgConnection, params: &ListParams) -> Result<Vec<ListRow>, StoreError> {
    let query_span = tracing::info_span!(
        "Fetching conversation page",
        page = params.page,
        size = params.size
    );

    let mut sql = String::from(
        r#"SELECT c.id, c.name, c.dialog_id AS owner, c.create_date, c.update_date
           FROM conversation c"#,
    );
    let limit_idx = if params.keyword.is_some() {
        sql.push_str(KEYWORD_FILTER);
        2
    } else {
        1
    };
    sql.push_str(&format!(
        " ORDER BY c.{} {}, c.id ASC LIMIT ${} OFFSET ${}",
        params.sort_by.column(),
        params.sort_order.sql(),
        limit_idx,
        limit_idx + 1
    ));

    let mut query = sqlx::query_as::<_, ListRow>(&sql);
    if let Some(keyword) = params.keyword.as_deref() {
        query = query.bind(like_pattern(keyword));
    }

    query
        .bind(params.size)
        .bind(params.offset)
        .fetch_all(&mut *conn)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch conversation page: {:?}", err);
            StoreError::from(err)
        })
}

pub async fn fetch_by_id(
    conn: &mut PgConnection,
    id: &str,
) -> Result<Vec<Conversation>, StoreError> {
    let query_span = tracing::info_span!("Fetching conversation by id", id = %id);
    let sql = format!("{SELECT_CONVERSATION} WHERE id = $1 ORDER BY create_date DESC");

    sqlx::query_as::<_, Conversation>(&sql)
        .bind(id)
        .fetch_all(&mut *conn)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch conversation: {:?}", err);
            StoreError::from(err)
        })
}

pub async fn fetch_by_dialog(
    conn: &mut PgConnection,
    dialog_id: &str,
) -> Result<Vec<Conversation>, StoreError> {
    let query_span = tracing::info_span!("Fetching conversations of dialog", dialog_id = %dialog_id);
    let sql = format!("{SELECT_CONVERSATION} WHERE dialog_id = $1 ORDER BY create_date DESC");

    sqlx::query_as::<_, Conversation>(&sql)
        .bind(dialog_id)
        .fetch_all(&mut *conn)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch conversations of dialog: {:?}", err);
            StoreError::from(err)
        })
}
