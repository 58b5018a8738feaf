use crate::configuration::AuthSettings;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::{get_header, jwt};
use crate::models;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse},
    Error, HttpMessage,
};
use futures::{
    future::{FutureExt, LocalBoxFuture},
    task::{Context, Poll},
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub struct ManagerMiddleware<S> {
    pub service: Rc<RefCell<S>>,
    pub auth: Arc<AuthSettings>,
}

impl<S, B> Service<ServiceRequest> for ManagerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if let Ok(service) = self.service.try_borrow_mut() {
            service.poll_ready(ctx)
        } else {
            Poll::Pending
        }
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let auth = self.auth.clone();
        async move {
            try_jwt(&req, &auth)?;
            Ok(req)
        }
        .then(|req: Result<ServiceRequest, String>| async move {
            match req {
                Ok(req) => {
                    let fut = service.borrow().call(req);
                    fut.await
                }
                Err(msg) => Err(JsonResponse::unauthorized(msg)),
            }
        })
        .boxed_local()
    }
}

#[tracing::instrument(name = "Authenticate with JWT", skip(req, auth))]
fn try_jwt(req: &ServiceRequest, auth: &AuthSettings) -> Result<(), String> {
    let authorization = get_header::<String>(req, "authorization")?
        .ok_or_else(|| "Missing Authorization header".to_string())?;
    let token = jwt::extract_bearer_token(&authorization)?;

    let claims = jwt::verify_token(token, &auth.jwt_secret).map_err(|err| {
        tracing::warn!("JWT validation failed: {}", err);
        err
    })?;

    let user = models::User {
        username: claims.username,
    };
    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    tracing::debug!("JWT authentication successful");
    Ok(())
}
