use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use issuetrack_core::{Issue, IssueRef, NewIssue, UpdateIssue};
use issuetrack_service::Acknowledgement;

use crate::payload::Payload;
use crate::reply::Failure;
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn create_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Payload(fields): Payload<NewIssue>,
) -> Result<Json<Issue>, Failure> {
    let issue = state.service.create(&project, fields).await?;
    Ok(Json(issue))
}

pub async fn list_issues(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Issue>>, Failure> {
    let issues = state.service.filter(&project, query).await?;
    Ok(Json(issues))
}

pub async fn update_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Payload(request): Payload<UpdateIssue>,
) -> Result<Json<Acknowledgement>, Failure> {
    let ack = state.service.update_by_id(&project, request).await?;
    Ok(Json(ack))
}

pub async fn delete_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Payload(request): Payload<IssueRef>,
) -> Result<Json<Acknowledgement>, Failure> {
    let ack = state.service.delete_by_id(&project, request).await?;
    Ok(Json(ack))
}
