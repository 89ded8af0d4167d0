use crate::models::classify_types::{DemoSnapshot, ErrorState};
use std::collections::HashSet;
use std::fmt::Write;

pub const DROP_ZONE_PROMPT: &str = "Drag audio file or click to upload";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub disabled: bool,
}

pub fn submit_control(snapshot: &DemoSnapshot) -> SubmitControl {
    let label = if snapshot.loading {
        "Processing..."
    } else if snapshot.files.is_empty() {
        "Upload an audio file"
    } else {
        "Predict Genre"
    };
    SubmitControl {
        label,
        disabled: snapshot.loading || snapshot.files.is_empty(),
    }
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn format_error(error: &ErrorState) -> String {
    match error {
        ErrorState::Validation(msg) => msg.clone(),
        other => format!("Error: {}", other.payload()),
    }
}

/// Text view of the session: queue, submit control, predictions, error.
pub fn render(snapshot: &DemoSnapshot) -> String {
    let mut out = String::new();

    if snapshot.files.is_empty() {
        let _ = writeln!(out, "{}", DROP_ZONE_PROMPT);
    } else {
        let _ = writeln!(out, "Files:");
        for (idx, file) in snapshot.files.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {} ({})", idx + 1, file.name, format_size(file.size));
        }
    }

    let control = submit_control(snapshot);
    if control.disabled {
        let _ = writeln!(out, "( {} )", control.label);
    } else {
        let _ = writeln!(out, "[ {} ]", control.label);
    }

    // Queue order, one line per distinct name.
    let mut shown = HashSet::new();
    for file in &snapshot.files {
        if !shown.insert(file.name.as_str()) {
            continue;
        }
        if let Some(genre) = snapshot.predictions.get(&file.name) {
            let _ = writeln!(out, "{}: Predicted Genre: {}", file.name, genre);
        }
    }

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "{}", format_error(error));
    }

    out
}
