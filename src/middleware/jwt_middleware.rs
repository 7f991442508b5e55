/// JWT authentication middleware.
///
/// Extracts the bearer token from the Authorization header, validates it
/// as an access token, and injects its claims into request extensions for
/// the wrapped handlers.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::decode_token;
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// Wrap routes that require an authenticated caller.
pub struct JwtMiddleware {
    jwt_config: JwtSettings,
}

impl JwtMiddleware {
    pub fn new(jwt_config: JwtSettings) -> Self {
        Self { jwt_config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            jwt_config: self.jwt_config.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    jwt_config: JwtSettings,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer_token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string);

        let token = match bearer_token {
            Some(token) => token,
            None => {
                tracing::warn!("missing or malformed Authorization header");
                return Box::pin(async {
                    Err(AppError::Auth(AuthError::MissingToken).into())
                });
            }
        };

        match decode_token(&token, &self.jwt_config) {
            Ok(claims) if claims.is_access() => {
                req.extensions_mut().insert(claims);
                let service = self.service.clone();
                Box::pin(async move { service.call(req).await })
            }
            Ok(claims) => {
                // A valid token of the wrong kind; refresh tokens never
                // authorize requests directly.
                tracing::warn!(token_type = %claims.token_type, "non-access token presented as bearer credential");
                Box::pin(async { Err(AppError::Auth(AuthError::WrongTokenType).into()) })
            }
            Err(e) => {
                tracing::warn!(error = %e, "bearer token rejected");
                Box::pin(async move { Err(e.into()) })
            }
        }
    }
}
