//! Route table for the task API.
//!
//! Paths are matched exactly, trailing slash included. Fixed routes are
//! registered before the id route, which only accepts digits. Anything
//! unmatched gets the JSON not-found body, as does an id too large for the
//! store. Read-only routes answer `HEAD` as well as `GET`.

use super::{error::ApiError, handlers};
use crate::task::ports::TaskRepository;
use actix_web::web;
use mockable::Clock;

/// Registers every task route.
///
/// The application must provide a `web::Data<TaskService<R, C>>`.
pub fn configure<R, C>(cfg: &mut web::ServiceConfig)
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    cfg.service(
        web::resource("/api/")
            .route(web::get().to(handlers::api_info))
            .route(web::head().to(handlers::api_info))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/api/tasks/")
            .route(web::get().to(handlers::list_tasks::<R, C>))
            .route(web::head().to(handlers::list_tasks::<R, C>))
            .route(web::post().to(handlers::create_task::<R, C>))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/api/tasks/high_priority/")
            .route(web::get().to(handlers::high_priority_tasks::<R, C>))
            .route(web::head().to(handlers::high_priority_tasks::<R, C>))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/api/tasks/statistics/")
            .route(web::get().to(handlers::task_statistics::<R, C>))
            .route(web::head().to(handlers::task_statistics::<R, C>))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/api/tasks/bulk_update/")
            .route(web::post().to(handlers::bulk_update_tasks::<R, C>))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/api/tasks/simple_create/")
            .route(web::post().to(handlers::simple_create_task::<R, C>))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource(r"/api/tasks/{id:\d+}/")
            .app_data(web::PathConfig::default().error_handler(|_, _| ApiError::NotFound.into()))
            .route(web::get().to(handlers::retrieve_task::<R, C>))
            .route(web::head().to(handlers::retrieve_task::<R, C>))
            .route(web::put().to(handlers::update_task::<R, C>))
            .route(web::patch().to(handlers::partial_update_task::<R, C>))
            .route(web::delete().to(handlers::delete_task::<R, C>))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .default_service(web::to(handlers::not_found));
}
