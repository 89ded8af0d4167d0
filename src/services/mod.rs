pub mod audio_files;
pub mod classifier;
pub mod demo_session;
pub mod dispatcher;
pub mod presenter;
pub mod upload_queue;
