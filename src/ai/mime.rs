pub const JPEG: &str = "image/jpeg";

/// Guess an image MIME type from its leading magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some(JPEG),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        _ => None,
    }
}

/// Classification requests always declare JPEG; warn when the payload is not.
pub fn warn_if_not_jpeg(bytes: &[u8]) {
    match sniff_image_mime(bytes) {
        Some(JPEG) => {}
        Some(other) => tracing::warn!("Image looks like {}, but will be sent as {}", other, JPEG),
        None => tracing::warn!(
            "Unrecognized image format (first 4 bytes: {:02X?}), sending as {}",
            &bytes[..bytes.len().min(4)],
            JPEG
        ),
    }
}
