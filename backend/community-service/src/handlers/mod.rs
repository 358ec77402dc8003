/// HTTP handlers for community-service
///
/// - `posts`: create, list and fetch posts
/// - `votes`: cast votes
/// - `comments`: list and create comments
/// - `activity`: activity timeline
/// - `health`: gated liveness endpoints
pub mod activity;
pub mod comments;
pub mod health;
pub mod posts;
pub mod votes;

use crate::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::metrics::serve_metrics;
use actix_middleware::JwtAuthMiddleware;
use actix_web::web;

/// Register every route. Community routes live under `api_prefix` and require
/// a bearer token; health and metrics routes are mounted at the root.
pub fn configure_routes(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/health", web::get().to(health::health))
        .route("/healthz", web::get().to(health::health))
        .route("/metrics", web::get().to(serve_metrics))
        .service(
            web::scope(api_prefix).service(
                web::scope("/community")
                    .wrap(JwtAuthMiddleware)
                    .service(
                        web::resource("/posts")
                            .route(web::get().to(posts::list_posts))
                            .route(web::post().to(posts::create_post)),
                    )
                    .service(web::resource("/posts/{post_id}").route(web::get().to(posts::get_post)))
                    .service(
                        web::resource("/posts/{post_id}/vote")
                            .route(web::post().to(votes::cast_vote)),
                    )
                    .service(
                        web::resource("/posts/{post_id}/comments")
                            .route(web::get().to(comments::list_comments))
                            .route(web::post().to(comments::create_comment)),
                    )
                    .service(
                        web::resource("/activity").route(web::get().to(activity::list_activity)),
                    ),
            ),
        );
}
