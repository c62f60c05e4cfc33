//! One profile-to-PDF run: scrape → generate → compose → render → write.
//!
//! Stages run strictly in sequence. Only an unreachable source or a render failure
//! aborts the run; generation problems degrade to the fallback document.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::document::compose_resume;
use crate::errors::AppError;
use crate::generation::{generate_resume, GeneratedResume};
use crate::layout::{write_pdf, RenderError};
use crate::runs::progress::RunStage;
use crate::scrape::scrape_profile;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub profile_url: String,
    pub target_role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub resume: GeneratedResume,
}

/// Executes a run registered in `state.progress` under `run_id`, recording the
/// failure there before returning it.
pub async fn run_resume(state: &AppState, run_id: Uuid, request: &RunRequest) -> Result<RunOutcome, AppError> {
    let result = execute(state, run_id, request).await;
    if let Err(e) = &result {
        error!(%run_id, "Run failed: {e}");
        state.progress.fail(run_id, e.to_string());
    }
    result
}

async fn execute(state: &AppState, run_id: Uuid, request: &RunRequest) -> Result<RunOutcome, AppError> {
    state.progress.update(run_id, RunStage::Scraping);
    info!(%run_id, "Scraping profile {}", request.profile_url);
    let profile = scrape_profile(
        state.page_loader.as_ref(),
        &request.profile_url,
        &state.config.scrape_settings(),
    )
    .await?;

    state.progress.update(run_id, RunStage::Generating);
    let resume = generate_resume(
        state.generator.as_ref(),
        &profile,
        request.target_role.as_deref(),
    )
    .await;

    state.progress.update(run_id, RunStage::Rendering);
    let blocks = compose_resume(&resume, &profile);
    let renderer = Arc::clone(&state.renderer);
    let layout = state.page_layout;
    let output_dir = state.config.output_dir.clone();
    let name = profile.name().to_string();

    // PDF layout and the file write are blocking work.
    let pdf_path = tokio::task::spawn_blocking(move || {
        let bytes = renderer.render(&blocks, &layout)?;
        write_pdf(&output_dir, &name, &bytes)
    })
    .await
    .map_err(|e| RenderError::Task(e.to_string()))??;

    info!(%run_id, origin = ?resume.origin, "Resume written to {}", pdf_path.display());
    state
        .progress
        .complete(run_id, resume.formatted_content.clone(), pdf_path);

    Ok(RunOutcome { run_id, resume })
}
