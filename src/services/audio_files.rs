use crate::error::AppError;
use crate::models::queue_types::SelectedFile;
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const AUDIO_EXTENSIONS: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("opus", "audio/opus"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("aiff", "audio/aiff"),
    ("aif", "audio/aiff"),
    ("wma", "audio/x-ms-wma"),
    ("webm", "audio/webm"),
];

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn audio_mime(name: &str) -> Option<&'static str> {
    let ext = extension_of(name)?;
    AUDIO_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

pub fn is_audio_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| audio_mime(n).is_some())
        .unwrap_or(false)
}

/// Audio files under `dir`, hidden entries skipped, sorted by name.
pub fn list_audio_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()).into());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_audio_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort_by(|a, b| {
        a.to_string_lossy()
            .to_lowercase()
            .cmp(&b.to_string_lossy().to_lowercase())
    });
    Ok(files)
}

/// Reads what the user picked. Directories expand to the audio files inside
/// them; files named explicitly are taken as-is, since the audio filter is
/// only advisory.
pub async fn read_selection(paths: &[PathBuf]) -> Result<Vec<SelectedFile>, AppError> {
    let mut selected = Vec::new();

    for path in paths {
        let files = if path.is_dir() {
            let found = list_audio_files(path)?;
            if found.is_empty() {
                warn!("No audio files found in {}", path.display());
            }
            found
        } else {
            if !is_audio_file(path) {
                warn!("{} does not look like an audio file, adding anyway", path.display());
            }
            vec![path.clone()]
        };

        for file in files {
            let content = tokio::fs::read(&file).await.map_err(|e| AppError {
                message: format!("Failed to read {}: {}", file.display(), e),
            })?;
            let name = file
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            selected.push(SelectedFile { name, content });
        }
    }

    Ok(selected)
}
