/// Database access layer for community-service
///
/// Repository functions are generic over `PgExecutor` so the same query runs
/// against the pool or inside a transaction (`&mut *tx`).
pub mod activity_repo;
pub mod comment_repo;
pub mod post_repo;
pub mod user_repo;
pub mod vote_repo;

use sqlx::PgPool;

/// Apply embedded migrations from `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
