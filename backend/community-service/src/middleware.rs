/// HTTP middleware assembly for community-service
///
/// Authentication, rate limiting and correlation IDs come from the shared
/// `actix-middleware` crate; this module builds the service-specific pieces.
use crate::config::CorsConfig;
use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;

pub use actix_middleware::{
    CorrelationIdMiddleware, JwtAuthMiddleware, RateLimitConfig, RateLimitMiddleware, UserId,
};

/// Security headers added to every response
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "no-referrer"))
        .add((
            "Permissions-Policy",
            "geolocation=(), camera=(), microphone=()",
        ))
        .add(("Cross-Origin-Opener-Policy", "same-origin"))
}

/// CORS policy from configuration.
///
/// Credentials are only allowed with an explicit origin list.
pub fn cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        if config.allow_credentials {
            cors = cors.supports_credentials();
        }
    }

    cors
}
