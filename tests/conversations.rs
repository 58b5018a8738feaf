mod common;

use common::TestApp;
use serde_json::Value;

const LOG: &str = r#"[{"role":"user","content":"I want a refund"},{"role":"assistant","content":"Sure, processing"}]"#;

async fn seeded_app() -> Option<TestApp> {
    let app = common::spawn_app().await?;

    app.insert_dialog("d1", "tenant-a", "Support", 1).await;
    app.insert_dialog("d2", "tenant-a", "Sales", 2).await;
    app.insert_dialog("d3", "tenant-b", "Other", 3).await;

    app.insert_conversation("c1", Some("d1"), Some("Refund question"), Some(LOG), 1)
        .await;
    app.insert_conversation("c2", None, None, None, 4).await;

    Some(app)
}

async fn json_of(response: reqwest::Response) -> Value {
    response.json().await.expect("json body")
}

#[tokio::test]
async fn owner_listing_returns_threads_newest_first() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    let response = app
        .get("/api/v1/users/tenant-a/conversations", Some(token.as_str()))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = json_of(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["total"], 2);

    let list = body["data"]["list"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], "d2");
    assert_eq!(list[0]["name"], "Sales");
    assert_eq!(list[0]["latestMessage"], "");
    assert_eq!(list[1]["id"], "d1");
    assert_eq!(list[1]["name"], "Refund question");
    assert_eq!(list[1]["latestMessage"], "Sure, processing");
    assert_eq!(list[1]["createTime"], "2024-03-01 08:00:00");
    assert!(list[1].get("tenantId").is_none());
}

#[tokio::test]
async fn query_parameter_selects_owner_scope() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    let body = json_of(
        app.get("/api/v1/conversations?user_id=tenant-b", Some(token.as_str()))
            .await,
    )
    .await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["list"][0]["id"], "d3");
}

#[tokio::test]
async fn pagination_keeps_total() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    let body = json_of(
        app.get(
            "/api/v1/users/tenant-a/conversations?page=2&size=1",
            Some(token.as_str()),
        )
        .await,
    )
    .await;
    assert_eq!(body["data"]["total"], 2);
    let list = body["data"]["list"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "d1");

    let body = json_of(
        app.get(
            "/api/v1/users/tenant-a/conversations?sort_by=name&sort_order=ASC",
            Some(token.as_str()),
        )
        .await,
    )
    .await;
    assert_eq!(body["data"]["list"][0]["id"], "d2");
    assert_eq!(body["data"]["list"][1]["id"], "d1");
}

#[tokio::test]
async fn owner_keyword_matches_message_log() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    let body = json_of(
        app.get(
            "/api/v1/users/tenant-a/conversations?keyword=REFUND",
            Some(token.as_str()),
        )
        .await,
    )
    .await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["list"][0]["id"], "d1");

    let body = json_of(
        app.get("/api/v1/users/tenant-a/conversations?keyword=%25", Some(token.as_str()))
            .await,
    )
    .await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn global_search_adds_content_and_tenant() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    let body = json_of(app.get("/api/v1/conversations", Some(token.as_str())).await).await;
    assert_eq!(body["data"]["total"], 2);
    let list = body["data"]["list"].as_array().unwrap();
    assert_eq!(list[0]["id"], "c2");
    assert_eq!(list[0]["latestMessage"], "Conversation c2");
    assert_eq!(list[0]["tenantId"], "");
    assert_eq!(list[1]["id"], "c1");
    assert_eq!(list[1]["content"], "Sure, processing");
    assert_eq!(list[1]["tenantId"], "d1");

    let body = json_of(
        app.get("/api/v1/conversations?keyword=refund&user_id=%20", Some(token.as_str()))
            .await,
    )
    .await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["list"][0]["id"], "c1");
}

#[tokio::test]
async fn messages_are_normalized() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    let response = app
        .get("/api/v1/conversations/c1/messages", Some(token.as_str()))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = json_of(response).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["conversation"]["id"], "c1");
    assert_eq!(body["data"]["conversation"]["tenantId"], "d1");
    assert_eq!(body["data"]["conversation"]["messageLog"], LOG);

    let list = body["data"]["list"].as_array().unwrap();
    assert_eq!(list[0]["id"], "msg-0");
    assert_eq!(list[0]["role"], "user");
    assert_eq!(list[0]["content"], "I want a refund");
    assert_eq!(list[0]["conversation_id"], "c1");
    assert_eq!(list[0]["create_time"], "2024-03-01 10:00:00");
    assert_eq!(list[1]["role"], "assistant");
}

#[tokio::test]
async fn thread_id_falls_back_to_its_newest_conversation() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    let body = json_of(
        app.get("/api/v1/conversations/d1/messages", Some(token.as_str()))
            .await,
    )
    .await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["conversation"]["id"], "c1");

    let response = app
        .get("/api/v1/conversations/d2/messages", Some(token.as_str()))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = json_of(response).await;
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["conversation"]["id"], "d2");
}

#[tokio::test]
async fn unknown_conversation_is_not_found() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    let response = app
        .get("/api/v1/conversations/missing/messages", Some(token.as_str()))
        .await;
    assert_eq!(response.status().as_u16(), 404);
    let body = json_of(response).await;
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn invalid_paging_and_sorting_are_rejected() {
    let app = match seeded_app().await {
        Some(app) => app,
        None => return,
    };
    let token = app.token().await;

    for path in [
        "/api/v1/conversations?sort_by=message",
        "/api/v1/conversations?sort_order=sideways",
        "/api/v1/conversations?page=0",
        "/api/v1/conversations?size=1000",
        "/api/v1/conversations?page=abc",
        "/api/v1/conversations?page=9223372036854775807",
    ] {
        let response = app.get(path, Some(token.as_str())).await;
        assert_eq!(response.status().as_u16(), 400, "{}", path);
        let body = json_of(response).await;
        assert_eq!(body["code"], 400, "{}", path);
    }
}

#[tokio::test]
async fn requests_without_valid_token_are_unauthorized() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app.get("/api/v1/conversations", None).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .get("/api/v1/users/tenant-a/conversations", Some("not.a.token"))
        .await;
    assert_eq!(response.status().as_u16(), 401);

    let token = app.token().await;
    let body = json_of(app.get("/api/v1/auth/test", Some(token.as_str())).await).await;
    assert_eq!(body["data"]["user"]["username"], app.settings.auth.admin_username);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/auth/login", app.address))
        .json(&serde_json::json!({
            "username": app.settings.auth.admin_username,
            "password": "definitely-wrong",
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 400);
}
