mod log_entry_session;

pub use log_entry_session::LogEntrySession;
