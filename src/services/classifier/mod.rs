pub mod remote;

use crate::models::classify_types::ErrorState;
use crate::models::queue_types::PendingFile;
use std::future::Future;

/// Something that can label a single audio file with a genre.
pub trait GenreClassifier {
    fn classify(&self, file: &PendingFile) -> impl Future<Output = Result<String, ErrorState>>;
}
