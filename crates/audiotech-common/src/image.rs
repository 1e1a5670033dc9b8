//! Image attachments: file loading, content-type sniffing and base64 payloads.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::AttachmentError;

/// Content type used when nothing better can be determined.
pub const FALLBACK_MIME: &str = "image/jpeg";

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

/// An image attached to a chat turn, held as raw base64 plus its content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    mime_type: String,
    data: String,
    label: Option<String>,
}

impl ImageAttachment {
    /// Read an image file and encode it.
    ///
    /// The content type comes from the file's magic bytes, then its
    /// extension, then [`FALLBACK_MIME`]. Files with a known non-image
    /// extension and unrecognised content are rejected.
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let bytes = std::fs::read(path).map_err(|source| AttachmentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(AttachmentError::Empty(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let mime_type = match sniff_mime(&bytes) {
            Some(mime) => mime,
            None => match extension.as_deref() {
                Some(ext) => mime_for_extension(ext)
                    .ok_or_else(|| AttachmentError::NotAnImage(path.display().to_string()))?,
                None => FALLBACK_MIME,
            },
        };

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        tracing::debug!(
            path = %path.display(),
            mime_type,
            bytes = bytes.len(),
            "image attachment loaded"
        );

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: BASE64_STANDARD.encode(&bytes),
            label,
        })
    }

    /// Wrap already-decoded bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime_type = sniff_mime(bytes).unwrap_or(FALLBACK_MIME);
        Self {
            mime_type: mime_type.to_string(),
            data: BASE64_STANDARD.encode(bytes),
            label: None,
        }
    }

    /// Accept either a `data:<mime>;base64,<payload>` URL or a bare base64
    /// payload. A declared content type is kept as-is.
    pub fn from_encoded(encoded: &str) -> Result<Self, AttachmentError> {
        let encoded = encoded.trim();
        let payload = strip_data_url_prefix(encoded);
        if payload.is_empty() {
            return Err(AttachmentError::InvalidDataUrl(truncate(encoded)));
        }

        let declared = declared_mime(encoded);
        if let Some(ref mime) = declared {
            if !mime.starts_with("image/") {
                return Err(AttachmentError::NotAnImage(mime.clone()));
            }
        }

        let mime_type = match declared {
            Some(mime) => mime,
            None => {
                let head = BASE64_STANDARD
                    .decode(payload)
                    .map_err(|_| AttachmentError::InvalidDataUrl(truncate(encoded)))?;
                sniff_mime(&head).unwrap_or(FALLBACK_MIME).to_string()
            }
        };

        Ok(Self {
            mime_type,
            data: payload.to_string(),
            label: None,
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw base64 payload, never carrying a data-URL prefix.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Approximate decoded size in bytes.
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        ((self.data.len() / 4) * 3).saturating_sub(padding.min(2))
    }
}

/// Return the part after the first comma of a data URL, or the input
/// unchanged when there is no comma. A data URL with nothing after the
/// comma yields an empty payload.
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    match encoded.split_once(',') {
        Some((_, payload)) => payload,
        None => encoded,
    }
}

/// Detect common image formats from their leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    IMAGE_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

fn declared_mime(encoded: &str) -> Option<String> {
    let header = encoded.strip_prefix("data:")?.split_once(',')?.0;
    let mime = header.split(';').next()?.trim();
    if mime.is_empty() {
        None
    } else {
        Some(mime.to_ascii_lowercase())
    }
}

fn truncate(s: &str) -> String {
    s.chars().take(32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    #[test]
    fn strip_prefix_from_data_url() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,AAAA"), "AAAA");
    }

    #[test]
    fn strip_prefix_leaves_bare_payload() {
        assert_eq!(strip_data_url_prefix("iVBORw0KGgo="), "iVBORw0KGgo=");
    }

    #[test]
    fn strip_prefix_of_empty_data_url_is_empty() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,"), "");
    }

    #[test]
    fn from_encoded_rejects_data_url_without_payload() {
        let err = ImageAttachment::from_encoded("data:image/png;base64,").unwrap_err();
        assert!(matches!(err, AttachmentError::InvalidDataUrl(_)));

        let err = ImageAttachment::from_encoded("  data:image/jpeg;base64,  ").unwrap_err();
        assert!(matches!(err, AttachmentError::InvalidDataUrl(_)));
    }

    #[test]
    fn sniff_known_formats() {
        assert_eq!(sniff_mime(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_mime(b"RIFF\x10\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"hello"), None);
    }

    #[test]
    fn from_path_sniffs_content_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screenshot.jpg");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(PNG_HEADER)
            .unwrap();

        let image = ImageAttachment::from_path(&path).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.label(), Some("screenshot.jpg"));
        assert_eq!(
            BASE64_STANDARD.decode(image.data()).unwrap(),
            PNG_HEADER.to_vec()
        );
    }

    #[test]
    fn from_path_falls_back_to_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.HEIC");
        std::fs::write(&path, b"\x00\x00\x00\x18ftypheic").unwrap();

        let image = ImageAttachment::from_path(&path).unwrap();
        assert_eq!(image.mime_type(), "image/heic");
    }

    #[test]
    fn from_path_rejects_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"just some notes").unwrap();

        let err = ImageAttachment::from_path(&path).unwrap_err();
        assert!(matches!(err, AttachmentError::NotAnImage(_)));
    }

    #[test]
    fn from_path_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        let err = ImageAttachment::from_path(&path).unwrap_err();
        assert!(matches!(err, AttachmentError::Empty(_)));
    }

    #[test]
    fn from_path_missing_file() {
        let err = ImageAttachment::from_path(Path::new("/nonexistent/shot.png")).unwrap_err();
        assert!(matches!(err, AttachmentError::Read { .. }));
    }

    #[test]
    fn from_encoded_keeps_declared_type_and_strips_prefix() {
        let image = ImageAttachment::from_encoded("data:image/webp;base64,UklGRg==").unwrap();
        assert_eq!(image.mime_type(), "image/webp");
        assert_eq!(image.data(), "UklGRg==");
    }

    #[test]
    fn from_encoded_bare_payload_is_sniffed() {
        let payload = BASE64_STANDARD.encode(PNG_HEADER);
        let image = ImageAttachment::from_encoded(&payload).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data(), payload);
    }

    #[test]
    fn from_encoded_rejects_non_image_data_url() {
        let err = ImageAttachment::from_encoded("data:text/plain;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, AttachmentError::NotAnImage(_)));
    }

    #[test]
    fn from_encoded_rejects_garbage() {
        let err = ImageAttachment::from_encoded("not base64 at all!").unwrap_err();
        assert!(matches!(err, AttachmentError::InvalidDataUrl(_)));
    }

    #[test]
    fn decoded_len_accounts_for_padding() {
        let image = ImageAttachment::from_bytes(b"abcd");
        assert_eq!(image.data(), "YWJjZA==");
        assert_eq!(image.decoded_len(), 4);
    }
}
