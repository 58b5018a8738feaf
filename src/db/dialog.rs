use crate::db::{like_pattern, StoreError};
use crate::forms::ListParams;
use crate::models::{Dialog, ListRow};
use sqlx::PgConnection;
use tracing::Instrument;

// $2 is the escaped keyword pattern
const KEYWORD_FILTER: &str = r"
    AND (d.name ILIKE $2 ESCAPE '\'
         OR EXISTS (SELECT 1 FROM conversation c
                    WHERE c.dialog_id = d.id AND c.message::text ILIKE $2 ESCAPE '\'))";

pub async fn count_by_tenant(
    conn: &mut PgConnection,
    tenant_id: &str,
    keyword: Option<&str>,
) -> Result<i64, StoreError> {
    let query_span = tracing::info_span!("Counting dialogs of tenant", tenant_id = %tenant_id);

    let mut sql = String::from("SELECT COUNT(*) FROM dialog d WHERE d.tenant_id = $1");
    if keyword.is_some() {
        sql.push_str(KEYWORD_FILTER);
    }

    let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(tenant_id);
    if let Some(keyword) = keyword {
        query = query.bind(like_pattern(keyword));
    }

    query
        .fetch_one(&mut *conn)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count dialogs: {:?}", err);
            StoreError::from(err)
        })
}

pub async fn page_by_tenant(
    conn: &mut PgConnection,
    tenant_id: &str,
    params: &ListParams,
) -> Result<Vec<ListRow>, StoreError> {
    let query_span = tracing::info_span!(
        "Fetching dialog page of tenant",
        tenant_id = %tenant_id,
        page = params.page,
        size = params.size
    );

    let mut sql = String::from(
        r#"SELECT d.id, d.name, d.tenant_id AS owner, d.create_date, d.update_date
           FROM dialog d
           WHERE d.tenant_id = $1"#,
    );
    let limit_idx = if params.keyword.is_some() {
        sql.push_str(KEYWORD_FILTER);
        3
    } else {
        2
    };
    // column and direction come from closed enums, never from caller text
    sql.push_str(&format!(
        " ORDER BY d.{} {}, d.id ASC LIMIT ${} OFFSET ${}",
        params.sort_by.column(),
        params.sort_order.sql(),
        limit_idx,
        limit_idx + 1
    ));

    let mut query = sqlx::query_as::<_, ListRow>(&sql).bind(tenant_id);
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
            tracing::error!("Failed to fetch dialog page: {:?}", err);
            StoreError::from(err)
        })
}

pub async fn fetch_by_id(conn: &mut PgConnection, id: &str) -> Result<Vec<Dialog>, StoreError> {
    let query_span = tracing::info_span!("Fetching dialog by id", id = %id);

    sqlx::query_as::<_, Dialog>(
        r#"SELECT id, tenant_id, name, create_date, update_date
           FROM dialog
           WHERE id = $1
           ORDER BY create_date DESC"#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch dialog: {:?}", err);
        StoreError::from(err)
    })
}
