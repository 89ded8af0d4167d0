use crate::models::classify_types::{ErrorState, PredictionMap};
use crate::models::queue_types::PendingFile;
use crate::services::classifier::GenreClassifier;
use futures::future::try_join_all;
use log::{debug, error};

/// Uploads every file concurrently and collects the labels.
///
/// All or nothing: the first failure to settle becomes the batch error and
/// any labels already received are discarded. Later entries win when two
/// files share a name.
pub async fn dispatch<C: GenreClassifier>(
    classifier: &C,
    files: &[PendingFile],
) -> Result<PredictionMap, ErrorState> {
    let requests = files.iter().map(|file| async move {
        match classifier.classify(file).await {
            Ok(genre) => {
                debug!("{} classified as {}", file.name, genre);
                Ok((file.name.clone(), genre))
            }
            Err(e) => {
                error!("Failed to classify {}: {}", file.name, e.payload());
                Err(e)
            }
        }
    });

    let labelled = try_join_all(requests).await?;
    Ok(labelled.into_iter().collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::queue_types::FileId;
    use bytes::Bytes;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers from a fixed table keyed by file name and records every call.
    #[derive(Default)]
    pub(crate) struct ScriptedClassifier {
        pub answers: HashMap<String, Result<String, ErrorState>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl ScriptedClassifier {
        pub fn new(answers: &[(&str, Result<&str, ErrorState>)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(name, answer)| (name.to_string(), answer.clone().map(str::to_string)))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl GenreClassifier for ScriptedClassifier {
        async fn classify(&self, file: &PendingFile) -> Result<String, ErrorState> {
            self.calls.borrow_mut().push(file.name.clone());
            tokio::task::yield_now().await;
            self.answers
                .get(&file.name)
                .cloned()
                .unwrap_or_else(|| Err(ErrorState::Message(format!("no answer for {}", file.name))))
        }
    }

    pub(crate) fn pending(id: u64, name: &str) -> PendingFile {
        PendingFile {
            id: FileId(id),
            name: name.to_string(),
            content: Bytes::copy_from_slice(name.as_bytes()),
        }
    }

    #[tokio::test]
    async fn all_successes_build_the_map() {
        let classifier = ScriptedClassifier::new(&[("a.mp3", Ok("Rock")), ("b.wav", Ok("Jazz"))]);
        let files = vec![pending(0, "a.mp3"), pending(1, "b.wav")];

        let map = dispatch(&classifier, &files).await.unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a.mp3"], "Rock");
        assert_eq!(map["b.wav"], "Jazz");
        assert_eq!(*classifier.calls.borrow(), vec!["a.mp3", "b.wav"]);
    }

    #[tokio::test]
    async fn one_failure_fails_the_batch() {
        let payload = json!({"error": "could not decode"});
        let classifier = ScriptedClassifier::new(&[
            ("a.mp3", Ok("Rock")),
            ("b.wav", Err(ErrorState::Remote(payload.clone()))),
        ]);
        let files = vec![pending(0, "a.mp3"), pending(1, "b.wav")];

        let result = dispatch(&classifier, &files).await;
        assert_eq!(result, Err(ErrorState::Remote(payload)));
    }

    #[tokio::test]
    async fn duplicate_names_collapse_to_last_label() {
        let classifier = ScriptedClassifier::new(&[("song.mp3", Ok("Pop"))]);
        let files = vec![pending(0, "song.mp3"), pending(1, "song.mp3")];

        let map = dispatch(&classifier, &files).await.unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(classifier.call_count(), 2);
    }

    #[tokio::test]
    async fn empty_input_sends_nothing() {
        let classifier = ScriptedClassifier::default();
        let map = dispatch(&classifier, &[]).await.unwrap();
        assert!(map.is_empty());
        assert_eq!(classifier.call_count(), 0);
    }
}
