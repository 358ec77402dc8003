//! Request correlation ID middleware
//!
//! - If the request has an `X-Correlation-ID` header: use it
//! - Otherwise: generate a UUID v4
//! - Run the rest of the request inside a `request_correlation` span carrying
//!   `correlation_id`, so every log line of the request can be joined on it
//! - Echo it on the response
//!
//! ## Example
//! ```rust,ignore
//! use actix_middleware::CorrelationIdMiddleware;
//! use actix_web::App;
//!
//! let app = App::new().wrap(CorrelationIdMiddleware);
//! ```

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use tracing::Instrument;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Longest inbound correlation ID that is accepted as-is
const MAX_CORRELATION_ID_LEN: usize = 128;

/// Middleware that manages request correlation IDs
#[derive(Clone)]
pub struct CorrelationIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for CorrelationIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelationIdMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelationIdMiddlewareService { service }))
    }
}

pub struct CorrelationIdMiddlewareService<S> {
    service: S,
}

fn inbound_correlation_id(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.len() <= MAX_CORRELATION_ID_LEN)
        .map(str::to_string)
}

impl<S, B> Service<ServiceRequest> for CorrelationIdMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let correlation_id =
            inbound_correlation_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

        let span = tracing::info_span!(
            "request_correlation",
            correlation_id = %correlation_id,
            method = %req.method(),
            path = %req.path(),
        );

        let fut = {
            let _guard = span.enter();
            self.service.call(req)
        };

        Box::pin(
            async move {
                let mut res = fut.await?;
                if let Ok(value) = HeaderValue::from_str(&correlation_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}
