use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use crate::services::{ConversationQueryEngine, MessageRetrievalEngine};
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let auth = Arc::new(settings.auth.clone());

    let query_engine = web::Data::new(ConversationQueryEngine::new(settings.query.clone()));
    let retrieval_engine = web::Data::new(MessageRetrievalEngine::new());

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "deserialize error at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            other => other.to_string(),
        };
        JsonResponse::bad_request(msg)
    });
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| JsonResponse::bad_request(err.to_string()));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/api/v1/auth")
                    .service(routes::auth::login_handler)
                    .service(
                        web::scope("/test")
                            .wrap(middleware::authentication::Manager::new(auth.clone()))
                            .service(routes::auth::test_handler),
                    ),
            )
            .service(
                web::scope("/api/v1/conversations")
                    .wrap(middleware::authentication::Manager::new(auth.clone()))
                    .service(routes::conversation::list_handler)
                    .service(routes::conversation::messages_handler),
            )
            .service(
                web::scope("/api/v1/users")
                    .wrap(middleware::authentication::Manager::new(auth.clone()))
                    .service(routes::conversation::user_list_handler),
            )
            .app_data(json_config.clone())
            .app_data(query_config.clone())
            .app_data(pg_pool.clone())
            .app_data(query_engine.clone())
            .app_data(retrieval_engine.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
