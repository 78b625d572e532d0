//! Request handlers for the task routes.

use super::{
    error::ApiError,
    types::{
        BulkUpdateResponse, SimpleCreateResponse, TaskListQuery, api_info_body,
        split_bulk_payload,
    },
};
use crate::task::{
    domain::TaskId,
    ports::TaskRepository,
    services::{ListTasksRequest, TaskService, TaskServiceError, UpdateMode},
    validation::TaskPayload,
};
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use mockable::Clock;
use serde_json::{Map, Value};

type SharedService<R, C> = web::Data<TaskService<R, C>>;

/// `GET /api/tasks/`
pub async fn list_tasks<R, C>(
    service: SharedService<R, C>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = ListTasksRequest::from(TaskListQuery::parse(req.query_string()));
    let tasks = service
        .list(&request)
        .await
        .map_err(ApiError::from_service)?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// `POST /api/tasks/`
pub async fn create_task<R, C>(
    service: SharedService<R, C>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let received = parse_json_body(&req, &body)?;
    log::debug!("received task data: {received}");

    let payload = TaskPayload::from_json(received.clone()).map_err(|errors| {
        ApiError::CreateRejected {
            errors,
            received_data: received.clone(),
        }
    })?;

    match service.create(&payload).await {
        Ok(task) => Ok(HttpResponse::Created().json(task)),
        Err(TaskServiceError::Validation(errors)) => {
            log::debug!("task validation errors: {errors}");
            Err(ApiError::CreateRejected {
                errors,
                received_data: received,
            })
        }
        Err(other) => Err(ApiError::from_service(other)),
    }
}

/// `POST /api/tasks/simple_create/`
pub async fn simple_create_task<R, C>(
    service: SharedService<R, C>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let received = parse_json_body(&req, &body)?;
    let rejected = |error: String| ApiError::SimpleCreateRejected {
        error,
        received_data: received.clone(),
    };

    let payload =
        TaskPayload::from_json(received.clone()).map_err(|errors| rejected(errors.to_string()))?;
    match service.create(&payload).await {
        Ok(task) => Ok(HttpResponse::Created().json(SimpleCreateResponse {
            task,
            message: "Task created successfully!",
        })),
        Err(TaskServiceError::Validation(errors)) => Err(rejected(errors.to_string())),
        Err(other) => Err(ApiError::from_service(other)),
    }
}

/// `GET /api/tasks/{id}/`
pub async fn retrieve_task<R, C>(
    service: SharedService<R, C>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service
        .retrieve(TaskId::new(path.into_inner()))
        .await
        .map_err(ApiError::from_service)?;
    Ok(HttpResponse::Ok().json(task))
}

/// `PUT /api/tasks/{id}/`
pub async fn update_task<R, C>(
    service: SharedService<R, C>,
    path: web::Path<i64>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    write_update(&service, path.into_inner(), &req, &body, UpdateMode::Full).await
}

/// `PATCH /api/tasks/{id}/`
pub async fn partial_update_task<R, C>(
    service: SharedService<R, C>,
    path: web::Path<i64>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    write_update(&service, path.into_inner(), &req, &body, UpdateMode::Partial).await
}

async fn write_update<R, C>(
    service: &TaskService<R, C>,
    id: i64,
    req: &HttpRequest,
    body: &[u8],
    mode: UpdateMode,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload =
        TaskPayload::from_json(parse_json_body(req, body)?).map_err(ApiError::InvalidFields)?;
    let task = service
        .update(TaskId::new(id), &payload, mode)
        .await
        .map_err(ApiError::from_service)?;
    Ok(HttpResponse::Ok().json(task))
}

/// `DELETE /api/tasks/{id}/`
pub async fn delete_task<R, C>(
    service: SharedService<R, C>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service
        .delete(TaskId::new(path.into_inner()))
        .await
        .map_err(ApiError::from_service)?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/tasks/high_priority/`
pub async fn high_priority_tasks<R, C>(
    service: SharedService<R, C>,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = service
        .high_priority()
        .await
        .map_err(ApiError::from_service)?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// `GET /api/tasks/statistics/`
pub async fn task_statistics<R, C>(service: SharedService<R, C>) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let stats = service.statistics().await.map_err(ApiError::from_service)?;
    Ok(HttpResponse::Ok().json(stats))
}

/// `POST /api/tasks/bulk_update/`
pub async fn bulk_update_tasks<R, C>(
    service: SharedService<R, C>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload =
        TaskPayload::from_json(parse_json_body(&req, &body)?).map_err(ApiError::BulkRejected)?;
    let (ids, fields) = split_bulk_payload(payload).map_err(ApiError::BulkRejected)?;

    match service.bulk_update(&ids, &fields).await {
        Ok(tasks) => Ok(HttpResponse::Ok().json(BulkUpdateResponse::from(tasks))),
        Err(TaskServiceError::Validation(errors)) => Err(ApiError::BulkRejected(errors)),
        Err(other) => Err(ApiError::from_service(other)),
    }
}

/// `GET /api/`
pub async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(api_info_body())
}

/// Fallback for methods a route does not support.
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed(req.method().to_string()))
}

/// Fallback for paths no route matches.
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

/// Checks the declared content type and decodes the body.
///
/// An empty body decodes to an empty object so that it fails field
/// validation rather than parsing.
fn parse_json_body(req: &HttpRequest, body: &[u8]) -> Result<Value, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !is_json_media_type(content_type) {
        return Err(ApiError::UnsupportedMediaType(content_type.to_owned()));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|err| ApiError::MalformedJson(err.to_string()))
}

fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
