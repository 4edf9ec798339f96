use actix_web::web;

pub mod api;
pub mod problem;

/// Register the JSON API under `/api` together with its query error handling.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(problem::query_error_handler))
        .service(web::scope("/api").service(api::api_v1_prices));
}
