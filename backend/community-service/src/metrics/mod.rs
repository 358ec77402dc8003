//! Prometheus metrics for community-service.
//!
//! Exposes community collectors and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use prometheus::{Encoder, TextEncoder};

pub mod community;

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %err, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};

    #[actix_rt::test]
    async fn test_serve_metrics_renders_community_counters() {
        community::POSTS_CREATED_TOTAL.inc_by(0);
        community::VOTE_OUTCOMES_TOTAL
            .with_label_values(&["unchanged"])
            .inc_by(0);

        let resp = serve_metrics().await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("community_posts_created_total"));
        assert!(text.contains("community_vote_outcomes_total"));
    }
}
