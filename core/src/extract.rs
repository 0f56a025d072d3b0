use crate::error::{RankError, Result};
use crate::normalize::{normalize, NO_READABLE_TEXT};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Raw text of every page of an in-memory PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(RankError::Pdf(format!("{e:?}"))),
        Err(_) => Err(RankError::Pdf("decoder panicked".into())),
    }
}

/// Extract and normalize a resume. Unreadable files yield the sentinel text.
pub fn extract_resume_text(name: &str, bytes: &[u8]) -> String {
    match extract_pdf_text(bytes) {
        Ok(text) => {
            let text = normalize(&text);
            if text == NO_READABLE_TEXT {
                tracing::warn!(file = name, "pdf contains no extractable text");
            }
            text
        }
        Err(e) => {
            tracing::warn!(file = name, error = %e, "failed to read pdf");
            NO_READABLE_TEXT.to_string()
        }
    }
}
