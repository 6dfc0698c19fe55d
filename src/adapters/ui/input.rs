//! Input collector. Holds the text buffer and the optional image until submit.
//!
//! Pure state: the terminal plumbing lives in `editor` and `tui`. Submitting
//! never clears the collector — the session reset does that, from outside.

use crate::domain::{ImageAttachment, StudyRequest};

/// Collects one submission's worth of input: mutable text plus at most one
/// image. While `is_loading` is set externally, every mutation and `submit`
/// is a no-op; the UI disables new submissions that way, so at most one
/// request is ever in flight.
#[derive(Debug, Default)]
pub struct InputCollector {
    text: String,
    image: Option<ImageAttachment>,
    is_loading: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Driven by the coordinator, not by this component.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.is_loading {
            return;
        }
        self.text = text.into();
    }

    /// Attach an image, replacing any previous one. The replaced attachment's
    /// bytes (the preview resource) are dropped here.
    pub fn set_image(&mut self, image: ImageAttachment) {
        if self.is_loading {
            return;
        }
        self.image = Some(image);
    }

    /// Remove the image and release its bytes.
    pub fn clear_image(&mut self) {
        if self.is_loading {
            return;
        }
        self.image = None;
    }

    /// Produce the request to send, exactly once per call. Silent no-op
    /// (`None`) when loading, or when the text is blank and no image is
    /// attached. The collector's own state is left untouched.
    pub fn submit(&self) -> Option<StudyRequest> {
        if self.is_loading {
            return None;
        }
        if self.text.trim().is_empty() && self.image.is_none() {
            return None;
        }
        Some(StudyRequest {
            text: self.text.clone(),
            image: self.image.clone(),
        })
    }
}

/// Map a file extension to the image MIME type the picker accepts.
/// Anything else is rejected at pick time.
pub fn image_mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_image() -> ImageAttachment {
        ImageAttachment::new(vec![0xFF, 0xD8], "image/jpeg", "foto.jpg")
    }

    #[test]
    fn blank_text_and_no_image_never_submits() {
        let mut collector = InputCollector::new();
        assert!(collector.submit().is_none());

        collector.set_text("   \n\t  ");
        assert!(collector.submit().is_none());
    }

    #[test]
    fn text_alone_submits_untrimmed() {
        let mut collector = InputCollector::new();
        collector.set_text("  hallo  ");
        let request = collector.submit().expect("non-empty");
        // The raw text is sent as-is; trimming is only the emptiness check.
        assert_eq!(request.text, "  hallo  ");
        assert!(request.image.is_none());
    }

    #[test]
    fn image_alone_submits() {
        let mut collector = InputCollector::new();
        collector.set_image(some_image());
        let request = collector.submit().expect("image counts as input");
        assert!(request.image.is_some());
    }

    #[test]
    fn submit_does_not_clear_state() {
        let mut collector = InputCollector::new();
        collector.set_text("hallo");
        collector.submit();
        assert_eq!(collector.text(), "hallo");
        assert!(collector.submit().is_some());
    }

    #[test]
    fn loading_gates_everything() {
        let mut collector = InputCollector::new();
        collector.set_text("hallo");
        collector.set_loading(true);

        assert!(collector.submit().is_none());
        collector.set_text("overschreven");
        collector.set_image(some_image());
        collector.clear_image();
        assert_eq!(collector.text(), "hallo");
        assert!(collector.image().is_none());

        collector.set_loading(false);
        assert!(collector.submit().is_some());
    }

    #[test]
    fn replacing_image_drops_previous() {
        let mut collector = InputCollector::new();
        collector.set_image(some_image());
        collector.set_image(ImageAttachment::new(vec![1], "image/png", "nieuw.png"));
        assert_eq!(collector.image().unwrap().file_name, "nieuw.png");

        collector.clear_image();
        assert!(collector.image().is_none());
    }

    #[test]
    fn mime_mapping_accepts_images_only() {
        assert_eq!(image_mime_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(image_mime_for_extension("png"), Some("image/png"));
        assert_eq!(image_mime_for_extension("pdf"), None);
        assert_eq!(image_mime_for_extension("txt"), None);
        assert_eq!(image_mime_for_extension(""), None);
    }
}
