pub mod event_log;
pub mod executor;
pub mod path_check;
