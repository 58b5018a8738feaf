use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde::Serialize;

/// Response envelope shared by every endpoint: `{code, message, data}`.
/// `code` is 0 on success and the HTTP status otherwise.
#[derive(Serialize, Debug)]
pub struct JsonResponse<T> {
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug)]
pub struct JsonResponseBuilder<T>
where
    T: Serialize,
{
    message: String,
    data: Option<T>,
}

impl<T> Default for JsonResponseBuilder<T>
where
    T: Serialize,
{
    fn default() -> Self {
        Self {
            message: String::new(),
            data: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub fn set_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn set_msg<I: Into<String>>(mut self, msg: I) -> Self {
        self.message = msg.into();
        self
    }

    fn into_response(self, code: u32, default_msg: &str) -> JsonResponse<T> {
        let message = if self.message.trim().is_empty() {
            default_msg.to_string()
        } else {
            self.message
        };

        JsonResponse {
            code,
            message,
            data: self.data,
        }
    }

    pub fn ok<I: Into<String>>(self, msg: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.set_msg(msg).into_response(0, "Success"))
    }

    fn to_error(self, status: StatusCode, msg: String, default_msg: &str) -> Error {
        let response = self
            .set_msg(msg)
            .into_response(u32::from(status.as_u16()), default_msg);
        let message = response.message.clone();

        InternalError::from_response(message, HttpResponse::build(status).json(response)).into()
    }

    pub fn bad_request<I: Into<String>>(self, msg: I) -> Error {
        self.to_error(StatusCode::BAD_REQUEST, msg.into(), "Bad request")
    }

    pub fn unauthorized<I: Into<String>>(self, msg: I) -> Error {
        self.to_error(StatusCode::UNAUTHORIZED, msg.into(), "Unauthorized")
    }

    pub fn not_found<I: Into<String>>(self, msg: I) -> Error {
        self.to_error(StatusCode::NOT_FOUND, msg.into(), "Object not found")
    }

    pub fn internal_server_error<I: Into<String>>(self, msg: I) -> Error {
        self.to_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            msg.into(),
            "Internal error",
        )
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl JsonResponse<serde_json::Value> {
    pub fn bad_request<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<serde_json::Value>::build().bad_request(msg)
    }

    pub fn unauthorized<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<serde_json::Value>::build().unauthorized(msg)
    }

    pub fn not_found<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<serde_json::Value>::build().not_found(msg)
    }

    pub fn internal_server_error<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<serde_json::Value>::build().internal_server_error(msg)
    }
}
