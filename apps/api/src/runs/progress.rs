//! Per-run progress tracking shared between the pipeline and the HTTP handlers.
//!
//! The store is owned by `AppState` and cloned into whoever needs it; clones share
//! the same map. Entries live until `expire` removes them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Starting,
    Scraping,
    Generating,
    Rendering,
    Complete,
    Failed,
}

impl RunStage {
    pub fn status(self) -> &'static str {
        match self {
            RunStage::Starting => "Starting...",
            RunStage::Scraping => "Scraping profile...",
            RunStage::Generating => "Generating resume...",
            RunStage::Rendering => "Creating PDF...",
            RunStage::Complete => "Complete!",
            RunStage::Failed => "Error",
        }
    }

    pub fn percent(self) -> u8 {
        match self {
            RunStage::Starting | RunStage::Failed => 0,
            RunStage::Scraping => 20,
            RunStage::Generating => 60,
            RunStage::Rendering => 80,
            RunStage::Complete => 100,
        }
    }
}

/// Snapshot of one run, as served by the progress endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RunProgress {
    pub stage: RunStage,
    pub status: String,
    pub progress: u8,
    pub resume_content: String,
    pub error: Option<String>,
    #[serde(skip)]
    pub pdf_path: Option<PathBuf>,
    pub updated_at: DateTime<Utc>,
}

impl RunProgress {
    fn new() -> Self {
        Self {
            stage: RunStage::Starting,
            status: RunStage::Starting.status().to_string(),
            progress: RunStage::Starting.percent(),
            resume_content: String::new(),
            error: None,
            pdf_path: None,
            updated_at: Utc::now(),
        }
    }

    fn set_stage(&mut self, stage: RunStage) {
        self.stage = stage;
        self.status = stage.status().to_string();
        self.progress = stage.percent();
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    runs: Arc<DashMap<Uuid, RunProgress>>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new run at `Starting` and returns its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.runs.insert(id, RunProgress::new());
        id
    }

    /// Moves a run to `stage`. Returns `false` if the run is unknown (e.g. expired).
    pub fn update(&self, id: Uuid, stage: RunStage) -> bool {
        match self.runs.get_mut(&id) {
            Some(mut run) => {
                run.set_stage(stage);
                true
            }
            None => false,
        }
    }

    pub fn complete(&self, id: Uuid, resume_content: String, pdf_path: PathBuf) {
        if let Some(mut run) = self.runs.get_mut(&id) {
            run.set_stage(RunStage::Complete);
            run.resume_content = resume_content;
            run.pdf_path = Some(pdf_path);
        }
    }

    /// Marks a run failed, keeping the progress it had reached.
    pub fn fail(&self, id: Uuid, error: impl Into<String>) {
        if let Some(mut run) = self.runs.get_mut(&id) {
            let error = error.into();
            run.stage = RunStage::Failed;
            run.status = format!("Error: {error}");
            run.error = Some(error);
            run.updated_at = Utc::now();
        }
    }

    pub fn get(&self, id: Uuid) -> Option<RunProgress> {
        self.runs.get(&id).map(|run| run.clone())
    }

    /// Drops runs not updated within `ttl`; returns how many were removed.
    pub fn expire(&self, ttl: Duration) -> usize {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return 0;
        };
        let cutoff = Utc::now() - ttl;
        let mut removed = 0;
        self.runs.retain(|_, run| {
            let keep = run.updated_at >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_to_complete() {
        let store = ProgressStore::new();
        let id = store.create();
        assert_eq!(store.get(id).unwrap().progress, 0);

        assert!(store.update(id, RunStage::Scraping));
        assert_eq!(store.get(id).unwrap().progress, 20);
        store.update(id, RunStage::Generating);
        store.update(id, RunStage::Rendering);
        assert_eq!(store.get(id).unwrap().status, "Creating PDF...");

        store.complete(id, "Jane Doe\nSUMMARY".into(), PathBuf::from("output/r.pdf"));
        let run = store.get(id).unwrap();
        assert_eq!(run.stage, RunStage::Complete);
        assert_eq!(run.progress, 100);
        assert_eq!(run.resume_content, "Jane Doe\nSUMMARY");
        assert_eq!(run.pdf_path.as_deref(), Some(std::path::Path::new("output/r.pdf")));
    }

    #[test]
    fn test_fail_keeps_progress_and_records_error() {
        let store = ProgressStore::new();
        let id = store.create();
        store.update(id, RunStage::Generating);
        store.fail(id, "page unreachable");

        let run = store.get(id).unwrap();
        assert_eq!(run.stage, RunStage::Failed);
        assert_eq!(run.progress, 60);
        assert_eq!(run.status, "Error: page unreachable");
        assert_eq!(run.error.as_deref(), Some("page unreachable"));
        assert!(run.pdf_path.is_none());
    }

    #[test]
    fn test_unknown_run_is_ignored() {
        let store = ProgressStore::new();
        assert!(!store.update(Uuid::new_v4(), RunStage::Scraping));
        store.fail(Uuid::new_v4(), "x");
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = ProgressStore::new();
        let id = store.clone().create();
        assert!(store.get(id).is_some());
    }

    #[test]
    fn test_expire_removes_only_stale_runs() {
        let store = ProgressStore::new();
        let stale = store.create();
        let fresh = store.create();
        store.runs.get_mut(&stale).unwrap().updated_at -= chrono::Duration::hours(2);

        assert_eq!(store.expire(Duration::from_secs(3600)), 1);
        assert!(store.get(stale).is_none());
        assert!(store.get(fresh).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_serialized_snapshot_hides_pdf_path() {
        let store = ProgressStore::new();
        let id = store.create();
        store.complete(id, "text".into(), PathBuf::from("/srv/output/secret.pdf"));
        let json = serde_json::to_value(store.get(id).unwrap()).unwrap();
        assert_eq!(json["stage"], "complete");
        assert_eq!(json["progress"], 100);
        assert!(json.get("pdf_path").is_none());
    }
}
