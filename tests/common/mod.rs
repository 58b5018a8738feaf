#![allow(dead_code)]

use chat_history::configuration::{get_configuration, DatabaseSettings, Settings};
use sqlx::{Connection, Executor, PgConnection, PgPool};

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub settings: Settings,
}

pub async fn spawn_app() -> Option<TestApp> {
    let configuration = get_configuration().expect("Failed to get configuration");
    spawn_app_with_configuration(configuration).await
}

pub async fn spawn_app_with_configuration(mut configuration: Settings) -> Option<TestApp> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = chat_history::startup::run(listener, connection_pool.clone(), configuration.clone())
        .await
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        settings: configuration,
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await?;

    Ok(connection_pool)
}

impl TestApp {
    /// Logs in with the configured admin account and returns the bearer token.
    pub async fn token(&self) -> String {
        let response = reqwest::Client::new()
            .post(format!("{}/api/v1/auth/login", self.address))
            .json(&serde_json::json!({
                "username": self.settings.auth.admin_username,
                "password": self.settings.auth.admin_password,
            }))
            .send()
            .await
            .expect("Failed to execute request.");
        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.expect("json body");
        body["data"]["token"]
            .as_str()
            .expect("token in response")
            .to_string()
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = reqwest::Client::new().get(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn insert_dialog(&self, id: &str, tenant_id: &str, name: &str, day: u32) {
        sqlx::query(
            r#"INSERT INTO dialog (id, tenant_id, name, create_date, update_date)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(name)
        .bind(at(day, 8))
        .bind(at(day, 9))
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert dialog");
    }

    pub async fn insert_conversation(
        &self,
        id: &str,
        dialog_id: Option<&str>,
        name: Option<&str>,
        message: Option<&str>,
        day: u32,
    ) {
        sqlx::query(
            r#"INSERT INTO conversation (id, dialog_id, name, message, create_date, update_date)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(id)
        .bind(dialog_id)
        .bind(name)
        .bind(message)
        .bind(at(day, 10))
        .bind(at(day, 11))
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert conversation");
    }
}

pub fn at(day: u32, hour: u32) -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2024, 3, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid date")
}
