/// Maximum number of employees on one log
pub const MAX_CREW_SIZE: usize = 10;

/// Maximum number of photos attached to one log
pub const MAX_PHOTOS: usize = 10;

// `validator` length bounds are u64
pub const MAX_CREW_SIZE_U64: u64 = MAX_CREW_SIZE as u64;
pub const MAX_PHOTOS_U64: u64 = MAX_PHOTOS as u64;

/// Size of the stock employee roster
pub const DEFAULT_DIRECTORY_SIZE: usize = 20;

pub const DEFAULT_SUBMIT_ENDPOINT_URL: &str = "https://langford-log-backend.onrender.com/submit-log";

// =============================================================================
// PHOTO CONSTANTS
// =============================================================================

/// Content type stamped on every photo part, whatever the source encoding
pub const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// File extensions the photo library treats as images
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "heif"];

/// Check if a file extension names an image
pub fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
