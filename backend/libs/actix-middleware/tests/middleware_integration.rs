use actix_middleware::{JwtAuthMiddleware, RateLimitConfig, RateLimitMiddleware, UserId};
use actix_web::{dev::Service, http::StatusCode, test, web, App, HttpResponse};
use std::sync::Once;
use uuid::Uuid;

fn init_test_secret() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        crypto_core::jwt::initialize_jwt_secret("middleware-test-secret", "HS256")
            .expect("Failed to initialize test secret");
    });
}

async fn whoami(user_id: UserId) -> HttpResponse {
    HttpResponse::Ok().body(user_id.0.to_string())
}

async fn ok_handler() -> HttpResponse {
    HttpResponse::Ok().body("success")
}

#[actix_rt::test]
async fn test_valid_token_reaches_handler() {
    init_test_secret();
    let app = test::init_service(
        App::new()
            .wrap(JwtAuthMiddleware)
            .route("/me", web::get().to(whoami)),
    )
    .await;

    let user_id = Uuid::new_v4();
    let token = crypto_core::jwt::generate_access_token(user_id, false).unwrap();
    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, user_id.to_string());
}

#[actix_rt::test]
async fn test_missing_header_is_unauthorized() {
    init_test_secret();
    let app = test::init_service(
        App::new()
            .wrap(JwtAuthMiddleware)
            .route("/me", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get().uri("/me").to_request();
    let err = app.call(req).await.err().expect("request should be rejected");

    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_garbage_token_is_unauthorized() {
    init_test_secret();
    let app = test::init_service(
        App::new()
            .wrap(JwtAuthMiddleware)
            .route("/me", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let err = app.call(req).await.err().expect("request should be rejected");

    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_rate_limit_exceeded() {
    // Strict limiter: 2 requests per minute
    let app = test::init_service(
        App::new()
            .wrap(RateLimitMiddleware::new(RateLimitConfig::per_minute(2)))
            .route("/test", web::get().to(ok_handler)),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/test")
            .peer_addr("203.0.113.10:5000".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri("/test")
        .peer_addr("203.0.113.10:5001".parse().unwrap())
        .to_request();
    let err = app.call(req).await.err().expect("third request should be limited");
    assert_eq!(
        err.as_response_error().status_code(),
        StatusCode::TOO_MANY_REQUESTS
    );

    // Other clients keep their own bucket
    let req = test::TestRequest::get()
        .uri("/test")
        .peer_addr("203.0.113.11:5000".parse().unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
async fn test_rotating_forwarded_for_shares_one_bucket() {
    let app = test::init_service(
        App::new()
            .wrap(RateLimitMiddleware::new(RateLimitConfig::per_minute(2)))
            .route("/test", web::get().to(ok_handler)),
    )
    .await;

    let mut accepted = 0;
    for i in 0..50 {
        let req = test::TestRequest::get()
            .uri("/test")
            .peer_addr("192.0.2.1:4000".parse().unwrap())
            .insert_header(("X-Forwarded-For", format!("198.51.100.{}", i)))
            .to_request();
        if app.call(req).await.is_ok() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 2);
}
