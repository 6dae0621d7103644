//! Route handlers
//!
//! Each handler does its work in a `Result<Reply>` and collapses it into the
//! envelope, so failures never change the HTTP status.

use actix_web::error::UrlencodedError;
use actix_web::{HttpResponse, web};
use serde_json::json;

use super::envelope::Reply;
use super::validate::{Params, require_exact, require_existing, require_job};
use crate::{JobError, JobMap, JobRepository, JobStatus, Result, Transition};

type Form = std::result::Result<web::Form<Params>, actix_web::Error>;

/// A body over the form size limit is rejected outright; any other body
/// that is not form data counts as no parameters at all.
fn form_params(form: Form) -> Result<Params> {
    match form {
        Ok(form) => Ok(form.into_inner()),
        Err(e) => match e.as_error::<UrlencodedError>() {
            Some(UrlencodedError::Overflow { size, limit }) => {
                Err(JobError::InvalidParameter(format!(
                    "Request body too large: {} bytes exceeds the {} byte limit.",
                    size, limit
                )))
            }
            _ => Ok(Params::new()),
        },
    }
}

fn respond(result: Result<Reply>) -> HttpResponse {
    Reply::from(result).into_response()
}

fn listing(jobs: &JobMap) -> Result<Reply> {
    Reply::with_data(format!("Found {} job(s).", jobs.len()), jobs)
}

/// GET /
pub async fn index() -> HttpResponse {
    Reply::message("Welcome to jobkeeper. POST /create to start tracking a job.").into_response()
}

/// GET /hits
pub async fn hits(repo: web::Data<JobRepository>) -> HttpResponse {
    respond(record_hit(&repo).await)
}

async fn record_hit(repo: &JobRepository) -> Result<Reply> {
    let hits = repo.record_hit().await?;
    Reply::with_data(
        format!("Hello! This page has been seen {} times.", hits),
        &json!({ "hits": hits }),
    )
}

/// GET /health
pub async fn health(repo: web::Data<JobRepository>) -> HttpResponse {
    respond(check_health(&repo).await)
}

async fn check_health(repo: &JobRepository) -> Result<Reply> {
    if repo.health_check().await? {
        Reply::with_data("Store is reachable.", &json!({ "store": "ok" }))
    } else {
        Err(JobError::StoreUnavailable("health check failed".to_string()))
    }
}

/// POST /create with `name`
pub async fn create_job(repo: web::Data<JobRepository>, form: Form) -> HttpResponse {
    respond(create(&repo, form).await)
}

async fn create(repo: &JobRepository, form: Form) -> Result<Reply> {
    let params = form_params(form)?;
    require_exact(&params, &["name"])?;

    let name = params.get("name").map(|n| n.trim()).unwrap_or_default();
    if name.is_empty() {
        return Err(JobError::InvalidParameter(
            "Parameter name must not be empty.".to_string(),
        ));
    }

    let job = repo.create(name).await?;
    Reply::with_data(format!("Created job {}.", job.id), &job)
}

/// POST /pause with `id`
pub async fn pause_job(repo: web::Data<JobRepository>, form: Form) -> HttpResponse {
    respond(change_status(&repo, form, Transition::Pause).await)
}

/// POST /resume with `id`
pub async fn resume_job(repo: web::Data<JobRepository>, form: Form) -> HttpResponse {
    respond(change_status(&repo, form, Transition::Resume).await)
}

/// POST /stop with `id`
pub async fn stop_job(repo: web::Data<JobRepository>, form: Form) -> HttpResponse {
    respond(change_status(&repo, form, Transition::Stop).await)
}

async fn change_status(
    repo: &JobRepository,
    form: Form,
    transition: Transition,
) -> Result<Reply> {
    let params = form_params(form)?;
    let id = require_job(repo, &params).await?;
    let job = repo.transition(id, transition).await?;
    Reply::with_data(format!("Job {} {}.", job.id, transition.past_tense()), &job)
}

/// GET /jobs
pub async fn list_jobs(repo: web::Data<JobRepository>) -> HttpResponse {
    respond(list_all(&repo).await)
}

async fn list_all(repo: &JobRepository) -> Result<Reply> {
    listing(&repo.list_all().await?)
}

/// GET /jobs/{filter}/{value}
pub async fn filter_jobs(
    repo: web::Data<JobRepository>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (filter, value) = path.into_inner();
    respond(filter_by(&repo, &filter, &value).await)
}

async fn filter_by(repo: &JobRepository, filter: &str, value: &str) -> Result<Reply> {
    match filter {
        "id" => {
            let id = require_existing(repo, value).await?;
            let job = repo.get(id).await?;
            Reply::with_data(format!("Found job {}.", job.id), &job)
        }
        "status" => {
            let status: JobStatus = value.parse()?;
            listing(&repo.list_by_status(status).await?)
        }
        other => Err(JobError::InvalidFilter(format!(
            "Invalid filter type: {}. Must be one of id, status.",
            other
        ))),
    }
}
