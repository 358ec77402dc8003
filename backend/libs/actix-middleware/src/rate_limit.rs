//! Per-IP rate limiting middleware
//!
//! Token bucket per client address using the `governor` crate. The quota is
//! expressed per minute and the burst equals the full quota, so a client may
//! spend its whole allowance at once and then refills steadily.
//!
//! Buckets are keyed on the peer address of the connection. Forwarding
//! headers are client-controlled and are never used as the key.

use crate::error::json_error;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error,
};
use futures::future::LocalBoxFuture;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::future::{ready, Ready};
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, warn};

/// Rate limiter configuration
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Requests per minute per client IP
    pub requests_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 300,
        }
    }
}

impl RateLimitConfig {
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
        }
    }
}

/// Rate limit middleware factory
///
/// Cloning shares the underlying buckets, so one instance built outside the
/// `HttpServer` factory closure limits across all workers.
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl RateLimitMiddleware {
    pub fn new(config: RateLimitConfig) -> Self {
        let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
        }
    }

    /// Drop buckets that have fully refilled; keeps memory bounded.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
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
        let ip = extract_client_ip(&req);

        if self.limiter.check_key(&ip).is_err() {
            warn!(client_ip = %ip, "Rate limit exceeded");
            return Box::pin(async move {
                Err(json_error(
                    StatusCode::TOO_MANY_REQUESTS,
                    "rate_limited",
                    "Rate limit exceeded",
                ))
            });
        }

        debug!(client_ip = %ip, "Rate limit check passed");

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

/// Client address used as the bucket key
pub fn extract_client_ip(req: &ServiceRequest) -> IpAddr {
    req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}
