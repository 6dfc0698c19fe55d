//! Binary-to-text encoding for image transport.
//!
//! Isolated, side-effect-free step: raw bytes in, base64 out. The MIME type
//! travels alongside the encoded data in the request body, never inside it.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Encode raw image bytes for the `inlineData` request field.
/// Standard alphabet with padding, as the Gemini API expects.
pub fn encode_image(data: &[u8]) -> String {
    STANDARD.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_vector() {
        // "hello" in the standard alphabet, padded.
        assert_eq!(encode_image(b"hello"), "aGVsbG8=");
    }

    #[test]
    fn encodes_empty_input() {
        assert_eq!(encode_image(b""), "");
    }

    #[test]
    fn encodes_binary_bytes() {
        // PNG magic bytes; output must be pure ASCII base64.
        let encoded = encode_image(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(encoded, "iVBORw0KGgo=");
    }
}
