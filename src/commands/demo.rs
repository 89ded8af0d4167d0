use crate::error::AppError;
use crate::models::classify_types::SubmitOutcome;
use crate::models::queue_types::QueuedFile;
use crate::services::audio_files;
use crate::services::classifier::GenreClassifier;
use crate::services::demo_session::DemoSession;
use crate::services::presenter;
use log::info;
use std::path::PathBuf;

pub async fn add_paths(session: &DemoSession, paths: &[PathBuf]) -> Result<Vec<QueuedFile>, AppError> {
    let selected = audio_files::read_selection(paths).await?;
    let summary: Vec<(String, u64)> = selected
        .iter()
        .map(|f| (f.name.clone(), f.content.len() as u64))
        .collect();
    let ids = session.add_files(selected).await;
    info!("Queued {} file(s)", ids.len());

    Ok(summary
        .into_iter()
        .zip(ids)
        .map(|((name, size), id)| QueuedFile { id, name, size })
        .collect())
}

/// Removes the file shown at `position` (1-based) in the rendered list.
pub async fn remove_file(session: &DemoSession, position: usize) -> Result<QueuedFile, AppError> {
    let id = session
        .file_at(position)
        .await
        .ok_or_else(|| AppError::from(format!("No file at position {}", position)))?;
    let removed = session
        .remove_file(id)
        .await
        .ok_or_else(|| AppError::from(format!("File {} is no longer queued", id)))?;
    Ok(QueuedFile::from(&removed))
}

pub async fn predict_genres<C: GenreClassifier>(session: &DemoSession, classifier: &C) -> SubmitOutcome {
    session.submit(classifier).await
}

pub async fn get_demo_view(session: &DemoSession) -> String {
    presenter::render(&session.snapshot().await)
}
