//! Modules layer - Adapters for device capabilities
//!
//! Contains implementations of the capabilities the log form consumes,
//! such as the photo library picker.

pub mod photo_library;
