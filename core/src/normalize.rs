use std::borrow::Cow;

/// Returned in place of empty text so callers never see an empty document.
pub const NO_READABLE_TEXT: &str = "No readable text found.";

/// Trim extracted text, substituting [`NO_READABLE_TEXT`] when nothing is left.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NO_READABLE_TEXT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Byte variant of [`normalize`]. Invalid UTF-8 sequences are replaced, never rejected.
pub fn normalize_bytes(raw: &[u8]) -> String {
    let text: Cow<'_, str> = String::from_utf8_lossy(raw);
    normalize(&text)
}

/// True when `text` carries no extractable content.
pub fn is_unreadable(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t == NO_READABLE_TEXT
}
