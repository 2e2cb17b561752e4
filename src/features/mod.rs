pub mod log_entry;
pub mod log_form;
pub mod photos;
pub mod submission;
