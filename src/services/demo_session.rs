use crate::models::classify_types::{DemoSnapshot, ErrorState, PredictionMap, SubmitOutcome};
use crate::models::queue_types::{FileId, PendingFile, QueuedFile, SelectedFile};
use crate::services::classifier::GenreClassifier;
use crate::services::dispatcher;
use crate::services::upload_queue::UploadQueue;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const EMPTY_QUEUE_MESSAGE: &str = "Please upload a file";

#[derive(Default)]
struct DemoState {
    queue: UploadQueue,
    predictions: PredictionMap,
    error: Option<ErrorState>,
}

/// Clears the loading flag when dropped, whether the batch finished or the
/// submit future was abandoned.
struct LoadingGuard(Arc<AtomicBool>);

impl LoadingGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        LoadingGuard(flag.clone())
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// State behind the demo: queued files, the last predictions, the current
/// error and whether a batch is in flight.
///
/// The lock is only held between awaits, so the queue stays editable while a
/// batch is running. Submitting again during that window is refused. The
/// loading flag lives outside the lock so it can be reset from `Drop`.
#[derive(Clone, Default)]
pub struct DemoSession {
    state: Arc<Mutex<DemoState>>,
    loading: Arc<AtomicBool>,
}

impl DemoSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_files(&self, files: Vec<SelectedFile>) -> Vec<FileId> {
        let mut state = self.state.lock().await;
        let ids = state.queue.add(files);
        if !ids.is_empty() && matches!(state.error, Some(ErrorState::Validation(_))) {
            state.error = None;
        }
        debug!("Queue now holds {} file(s)", state.queue.len());
        ids
    }

    /// Drops the file and any prediction made under its name.
    pub async fn remove_file(&self, id: FileId) -> Option<PendingFile> {
        let mut state = self.state.lock().await;
        let removed = state.queue.remove(id)?;
        state.predictions.remove(&removed.name);
        Some(removed)
    }

    pub async fn submit<C: GenreClassifier>(&self, classifier: &C) -> SubmitOutcome {
        let (files, loading) = {
            let mut state = self.state.lock().await;
            if self.loading.load(Ordering::SeqCst) {
                warn!("Prediction already in progress, ignoring submit");
                return SubmitOutcome::Busy;
            }
            if state.queue.is_empty() {
                state.error = Some(ErrorState::Validation(EMPTY_QUEUE_MESSAGE.to_string()));
                return SubmitOutcome::NothingQueued;
            }
            state.error = None;
            (state.queue.files().to_vec(), LoadingGuard::engage(&self.loading))
        };

        info!("Predicting genres for {} file(s)", files.len());
        let result = dispatcher::dispatch(classifier, &files).await;

        let mut state = self.state.lock().await;
        // Results land and the flag drops under the same lock.
        let outcome = match result {
            Ok(mut predictions) => {
                // Files removed while the batch was running don't come back.
                predictions.retain(|name, _| state.queue.contains_name(name));
                let count = predictions.len();
                state.predictions = predictions;
                info!("Received {} prediction(s)", count);
                SubmitOutcome::Predicted(count)
            }
            Err(e) => {
                state.error = Some(e);
                SubmitOutcome::Failed
            }
        };
        drop(loading);
        outcome
    }

    pub async fn snapshot(&self) -> DemoSnapshot {
        let state = self.state.lock().await;
        DemoSnapshot {
            files: state.queue.files().iter().map(QueuedFile::from).collect(),
            predictions: state.predictions.clone(),
            error: state.error.clone(),
            loading: self.loading.load(Ordering::SeqCst),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Identity of the file at a 1-based position in the queue.
    pub async fn file_at(&self, position: usize) -> Option<FileId> {
        let state = self.state.lock().await;
        position
            .checked_sub(1)
            .and_then(|idx| state.queue.files().get(idx))
            .map(|f| f.id)
    }
}
