use crate::error::{PabuError, Result};

/// Turns uploaded bytes into indexable text.
///
/// The default implementation passes text-like payloads through and emits a
/// placeholder for binary formats. Real PDF/Word parsing or OCR plugs in
/// behind this trait.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], filename: &str, mime: &str) -> Result<String>;
}

#[derive(Debug, Default, Clone)]
pub struct DefaultExtractor;

impl DefaultExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for DefaultExtractor {
    fn extract(&self, bytes: &[u8], filename: &str, mime: &str) -> Result<String> {
        let mime = if mime.trim().is_empty() {
            mime_guess::from_path(filename)
                .first_raw()
                .unwrap_or("application/octet-stream")
                .to_string()
        } else {
            mime.to_string()
        };

        if is_text_like(&mime) {
            let text = String::from_utf8_lossy(bytes).into_owned();
            if text.trim().is_empty() {
                return Err(PabuError::Extraction(format!(
                    "No text content in {filename}"
                )));
            }
            return Ok(text);
        }

        Ok(format!(
            "[{mime} file \"{filename}\" uploaded. Automatic text extraction is not \
             configured for this format; content must be added manually.]"
        ))
    }
}

fn is_text_like(mime: &str) -> bool {
    mime.starts_with("text/")
        || matches!(
            mime,
            "application/json"
                | "application/xml"
                | "application/x-yaml"
                | "application/yaml"
                | "application/csv"
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let extractor = DefaultExtractor::new();
        let text = extractor
            .extract(b"Leave policy body", "policy.txt", "text/plain")
            .unwrap();
        assert_eq!(text, "Leave policy body");
    }

    #[test]
    fn mime_guessed_from_filename_when_missing() {
        let extractor = DefaultExtractor::new();
        let text = extractor.extract(b"# Handbook", "handbook.md", "").unwrap();
        assert_eq!(text, "# Handbook");
    }

    #[test]
    fn binary_formats_get_placeholder() {
        let extractor = DefaultExtractor::new();
        let text = extractor
            .extract(&[0x25, 0x50, 0x44, 0x46], "policy.pdf", "application/pdf")
            .unwrap();
        assert!(text.contains("policy.pdf"));
        assert!(text.contains("not"));
    }

    #[test]
    fn empty_text_upload_is_an_error() {
        let extractor = DefaultExtractor::new();
        let result = extractor.extract(b"   ", "empty.txt", "text/plain");
        assert!(matches!(result, Err(PabuError::Extraction(_))));
    }
}
