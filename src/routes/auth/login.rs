use crate::configuration::Settings;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::jwt;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;

/// POST /api/v1/auth/login
/// Exchanges the configured admin credentials for a bearer token.
#[tracing::instrument(name = "Login.", skip(form, settings))]
#[post("/login")]
pub async fn login_handler(
    form: web::Json<forms::LoginForm>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::bad_request(errors.to_string()));
    }

    let auth = &settings.auth;
    if form.username != auth.admin_username {
        tracing::info!("Login rejected: unknown user");
        return Err(JsonResponse::bad_request("Unknown user"));
    }
    if form.password != auth.admin_password {
        tracing::info!("Login rejected: wrong password");
        return Err(JsonResponse::bad_request("Wrong password"));
    }

    let token = jwt::issue_token(&form.username, &auth.jwt_secret, auth.token_ttl_secs)
        .map_err(|err| {
            tracing::error!("Failed to issue token: {}", err);
            JsonResponse::internal_server_error("")
        })?;

    Ok(JsonResponse::build()
        .set_data(serde_json::json!({ "token": token }))
        .ok("Login successful"))
}
