//! Filesystem-backed photo library
//!
//! Stands in for the on-device photo picker: images are chosen by name
//! from a configured library directory.

mod library_picker;

pub use library_picker::LibraryPhotoPicker;
