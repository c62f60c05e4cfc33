use axum::{
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{Html, IntoResponse},
    Json,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::ResumeOrigin;
use crate::runs::{run_resume, RunProgress, RunRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    pub profile_url: String,
    #[serde(default)]
    pub target_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub success: bool,
    pub run_id: Uuid,
    pub resume_content: String,
    pub origin: ResumeOrigin,
    pub message: String,
}

/// Accepts only absolute http(s) URLs with a host.
fn validate_profile_url(raw: &str) -> Result<String, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::Validation(format!("profile_url is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AppError::Validation(
            "profile_url must be an http(s) URL".to_string(),
        ));
    }
    Ok(url.to_string())
}

/// POST /api/v1/resumes
/// Runs the whole pipeline before responding. The returned `run_id` then addresses
/// the final progress snapshot, the PDF download and the preview.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    let profile_url = validate_profile_url(&req.profile_url)?;
    let target_role = req
        .target_role
        .map(|role| role.trim().to_string())
        .filter(|role| !role.is_empty());

    let run_id = state.progress.create();
    let outcome = run_resume(
        &state,
        run_id,
        &RunRequest {
            profile_url,
            target_role,
        },
    )
    .await?;

    Ok(Json(GenerateResumeResponse {
        success: true,
        run_id: outcome.run_id,
        resume_content: outcome.resume.formatted_content,
        origin: outcome.resume.origin,
        message: "Resume generated successfully!".to_string(),
    }))
}

/// GET /api/v1/resumes/:run_id/progress
pub async fn handle_progress(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<Json<RunProgress>, AppError> {
    state
        .progress
        .get(run_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Run {run_id} not found")))
}

/// GET /api/v1/resumes/:run_id/download
pub async fn handle_download(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf_path = state
        .progress
        .get(run_id)
        .and_then(|run| run.pdf_path)
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let bytes = match tokio::fs::read(&pdf_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("PDF file not found".to_string()));
        }
        Err(e) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "reading {}: {e}",
                pdf_path.display()
            )))
        }
    };

    Ok((
        [
            (CONTENT_TYPE, "application/pdf"),
            (CONTENT_DISPOSITION, "attachment; filename=\"resume.pdf\""),
        ],
        bytes,
    ))
}

/// GET /api/v1/resumes/:run_id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let run = state
        .progress
        .get(run_id)
        .filter(|run| !run.resume_content.is_empty())
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let body = escape_html(&run.resume_content).replace('\n', "<br>");
    Ok(Html(format!(
        r#"<html>
<head><title>Resume Preview</title></head>
<body style="font-family: Arial, sans-serif; margin: 40px; line-height: 1.6;">
  <h2>Resume Preview</h2>
  <div style="border: 1px solid #ddd; padding: 20px; background: #f9f9f9;">{body}</div>
  <br>
  <a href="/api/v1/resumes/{run_id}/download">Download PDF</a>
</body>
</html>"#
    )))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
