//! Route table
//!
//! - GET  /                        welcome message
//! - GET  /hits                    page hit counter
//! - GET  /health                  store reachability
//! - POST /create                  `name`
//! - POST /pause, /resume, /stop   `id`
//! - GET  /jobs                    every job keyed by id
//! - GET  /jobs/{filter}/{value}   filter is `id` or `status`

use super::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/hits", web::get().to(handlers::hits))
        .route("/health", web::get().to(handlers::health))
        .route("/create", web::post().to(handlers::create_job))
        .route("/pause", web::post().to(handlers::pause_job))
        .route("/resume", web::post().to(handlers::resume_job))
        .route("/stop", web::post().to(handlers::stop_job))
        .route("/jobs", web::get().to(handlers::list_jobs))
        .route("/jobs/{filter}/{value}", web::get().to(handlers::filter_jobs));
}
