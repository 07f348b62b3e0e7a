/// Sniff the image format from magic bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        _ => None,
    }
}

/// Formats the vision model cannot judge reliably.
pub fn is_vision_unsupported(mime: &str) -> bool {
    mime.to_ascii_lowercase().contains("gif")
}

/// MIME type to declare to the vision model.
///
/// Magic bytes win over the server's `Content-Type`; anything unrecognised is
/// declared as JPEG, which is what photo CDNs serve by default.
pub fn vision_mime(bytes: &[u8], content_type: &str) -> &'static str {
    if let Some(sniffed) = detect_image_mime(bytes) {
        return sniffed;
    }

    let content_type = content_type.to_ascii_lowercase();
    if content_type.contains("png") {
        "image/png"
    } else if content_type.contains("webp") {
        "image/webp"
    } else if content_type.contains("gif") {
        "image/gif"
    } else {
        tracing::warn!(
            "Unrecognized image format (first 4 bytes: {:02X?}, content-type {}), declaring image/jpeg",
            &bytes[..bytes.len().min(4)],
            content_type
        );
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some("image/png")
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            Some("image/webp")
        );
    }

    #[test]
    fn test_detect_gif() {
        assert_eq!(detect_image_mime(b"GIF89a"), Some("image/gif"));
        assert!(is_vision_unsupported("image/gif"));
    }

    #[test]
    fn test_unknown_bytes_use_content_type() {
        assert_eq!(vision_mime(&[0x00, 0x01], "image/png"), "image/png");
        assert_eq!(vision_mime(&[0x00, 0x01], "image/avif"), "image/jpeg");
    }

    #[test]
    fn test_magic_bytes_beat_content_type() {
        assert_eq!(vision_mime(b"GIF89a....", "image/jpeg"), "image/gif");
    }

    #[test]
    fn test_empty_falls_back_to_jpeg() {
        assert_eq!(vision_mime(&[], ""), "image/jpeg");
    }
}
