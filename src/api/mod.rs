pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::web;

/// Routes shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // GitHub users
        .service(
            web::scope("/users")
                .route("/list-from-github", web::get().to(users::list_from_github))
                .route("/list-from-github/filtered", web::get().to(users::list_from_github_filtered))
                .route("/save", web::post().to(users::save))
                .route("/import-github-page", web::post().to(users::import_github_page))
                .route("/import-from-github", web::post().to(users::import_from_github))
        );
}
