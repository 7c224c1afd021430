//! PDF header sniffing.
//!
//! Readers accept a `%PDF-x.y` header anywhere in the first kilobyte, since
//! some producers prepend junk (mail headers, BOMs). Anything else is
//! rejected before the PDF parser sees it.

use crate::error::{Error, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Version information from a PDF header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of the `%PDF-` marker
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Locate and validate the PDF header.
///
/// Returns [`Error::UnknownFormat`] when no header is found and
/// [`Error::UnsupportedVersion`] when the version is malformed.
pub fn sniff_pdf(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = data
        .get(start..start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;

    match version_bytes {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(PdfHeader {
                version: format!("{}.{}", *major as char, *minor as char),
                offset,
            })
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version_bytes).to_string(),
        )),
    }
}

/// Check if bytes start like a PDF.
pub fn is_pdf(data: &[u8]) -> bool {
    sniff_pdf(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_valid_pdf() {
        let header = sniff_pdf(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(header.version, "1.7");
        assert_eq!(header.offset, 0);
        assert_eq!(header.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_sniff_with_leading_junk() {
        let header = sniff_pdf(b"\xef\xbb\xbf%PDF-2.0\n").unwrap();
        assert_eq!(header.version, "2.0");
        assert_eq!(header.offset, 3);
    }

    #[test]
    fn test_sniff_not_pdf() {
        assert!(matches!(
            sniff_pdf(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(sniff_pdf(b""), Err(Error::UnknownFormat)));
        assert!(matches!(sniff_pdf(b"%PDF-1"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_sniff_bad_version() {
        assert!(matches!(
            sniff_pdf(b"%PDF-abc\n"),
            Err(Error::UnsupportedVersion(v)) if v == "abc"
        ));
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.4\n"));
        assert!(!is_pdf(b"Not a PDF"));
    }
}
