use crate::models::queue_types::{FileId, PendingFile, SelectedFile};
use bytes::Bytes;

/// Files waiting to be classified, in the order they were picked.
#[derive(Debug, Default)]
pub struct UploadQueue {
    files: Vec<PendingFile>,
    next_id: u64,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the selection in order. Names are not deduplicated.
    pub fn add(&mut self, selected: impl IntoIterator<Item = SelectedFile>) -> Vec<FileId> {
        let mut ids = Vec::new();
        for file in selected {
            let id = FileId(self.next_id);
            self.next_id += 1;
            self.files.push(PendingFile {
                id,
                name: file.name,
                content: Bytes::from(file.content),
            });
            ids.push(id);
        }
        ids
    }

    /// Removes the entry with this identity and returns it.
    pub fn remove(&mut self, id: FileId) -> Option<PendingFile> {
        let pos = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(pos))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name)
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(queue: &UploadQueue) -> Vec<&str> {
        queue.files().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn add_keeps_selection_order() {
        let mut queue = UploadQueue::new();
        queue.add(vec![SelectedFile::new("a.mp3", b"a".to_vec())]);
        queue.add(vec![
            SelectedFile::new("b.wav", b"b".to_vec()),
            SelectedFile::new("c.flac", b"c".to_vec()),
        ]);
        queue.add(Vec::new());

        assert_eq!(queue.len(), 3);
        assert_eq!(names(&queue), vec!["a.mp3", "b.wav", "c.flac"]);
    }

    #[test]
    fn duplicates_are_kept_as_separate_entries() {
        let mut queue = UploadQueue::new();
        let ids = queue.add(vec![
            SelectedFile::new("song.mp3", b"one".to_vec()),
            SelectedFile::new("song.mp3", b"one".to_vec()),
        ]);

        assert_eq!(queue.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn remove_goes_by_identity_not_name() {
        let mut queue = UploadQueue::new();
        let ids = queue.add(vec![
            SelectedFile::new("song.mp3", b"first".to_vec()),
            SelectedFile::new("song.mp3", b"second".to_vec()),
        ]);

        let removed = queue.remove(ids[1]).expect("second entry");
        assert_eq!(removed.content, Bytes::from_static(b"second"));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.files()[0].id, ids[0]);
        assert!(queue.contains_name("song.mp3"));

        assert!(queue.remove(ids[1]).is_none());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut queue = UploadQueue::new();
        let first = queue.add(vec![SelectedFile::new("a.mp3", Vec::new())])[0];
        queue.remove(first);
        let second = queue.add(vec![SelectedFile::new("a.mp3", Vec::new())])[0];
        assert_ne!(first, second);
        assert_eq!(queue.files().len(), 1);
        assert_eq!(queue.files()[0].id, second);
    }

    #[test]
    fn snapshots_share_the_audio_buffer() {
        let mut queue = UploadQueue::new();
        queue.add(vec![SelectedFile::new("a.mp3", vec![7u8; 4096])]);

        let snapshot = queue.files().to_vec();
        let upload_body = snapshot[0].content.clone();
        assert_eq!(upload_body.as_ptr(), queue.files()[0].content.as_ptr());
        assert_eq!(snapshot[0].size(), 4096);
    }
}
