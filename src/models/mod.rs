pub mod classify_types;
pub mod queue_types;
