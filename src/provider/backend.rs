//! PDF text-run extraction backed by lopdf.
//!
//! Walks each page's content stream, tracking the graphics and text state
//! closely enough to place every shown string: the current transformation
//! matrix (`cm`, `q`, `Q`), the text and line matrices (`Tm`, `Td`, `TD`,
//! `T*`, `'`, `"`), leading (`TL`), font and size (`Tf`) and rise (`Ts`).

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use super::TextRunProvider;
use crate::detect::sniff_pdf;
use crate::error::{Error, ExtractionError, Result};
use crate::model::{Metadata, PageRuns, TextRun};

/// Fallback average glyph advance, as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// TJ adjustment (thousandths of text space) above which a word space is
/// assumed.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Maximum depth when following `Parent` links for inherited attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// [`TextRunProvider`] backed by `lopdf::Document`.
pub struct LopdfProvider {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfProvider {
    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let header = sniff_pdf(data)?;
        log::debug!("Loading {} ({} bytes)", header, data.len());

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Load from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }
        let pages = doc.get_pages();
        Self { doc, pages }
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, number: u32) -> Result<ObjectId> {
        self.pages
            .get(&number)
            .copied()
            .ok_or(Error::PageOutOfRange(number, self.pages.len() as u32))
    }

    fn extract_page(&self, number: u32) -> Result<PageRuns> {
        let page_id = self.page_id(number)?;
        let (width, height) = self.page_dimensions(page_id);
        let content = self.page_content(page_id)?;
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let runs = self.parse_content_stream(&content, &fonts)?;
        log::debug!("Page {}: extracted {} runs", number, runs.len());

        Ok(PageRuns::new(number, width, height).with_runs(runs))
    }

    /// Page size from the (possibly inherited) MediaBox; Letter if absent.
    fn page_dimensions(&self, page_id: ObjectId) -> (f32, f32) {
        let media_box = self.inherited(page_id, b"MediaBox").and_then(|obj| {
            let obj = self.resolve(obj);
            let array = obj.as_array().ok()?;
            let nums: Vec<f32> = array
                .iter()
                .filter_map(|o| get_number(self.resolve(o)))
                .collect();
            (nums.len() == 4).then(|| ((nums[2] - nums[0]).abs(), (nums[3] - nums[1]).abs()))
        });
        media_box.unwrap_or((612.0, 792.0))
    }

    /// Look up a page attribute, following `Parent` links.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Option<&Object> {
        let mut dict = self.doc.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = dict.get(key) {
                return Some(value);
            }
            let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
            dict = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(r) => self.doc.get_object(*r).unwrap_or(obj),
            _ => obj,
        }
    }

    /// Raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without a content stream is blank, not broken.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => s
                    .decompressed_content()
                    .or_else(|_| Ok(s.content.clone())),
                Ok(Object::Array(arr)) => Ok(self.concat_streams(arr)),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    let data = s.decompressed_content().unwrap_or_else(|_| s.content.clone());
                    content.extend_from_slice(&data);
                    content.push(b' ');
                }
            }
        }
        content
    }

    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<Vec<TextRun>> {
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut runs = Vec::new();
        let mut gs_stack: Vec<SavedState> = Vec::new();
        let mut ctm = Matrix::IDENTITY;
        let mut text = TextState::default();

        for op in &content.operations {
            let operands = &op.operands;
            let num = |i: usize| operands.get(i).and_then(get_number);

            match op.operator.as_str() {
                "q" => gs_stack.push(SavedState::capture(ctm, &text)),
                "Q" => match gs_stack.pop() {
                    Some(saved) => ctm = saved.restore(&mut text),
                    None => ctm = Matrix::IDENTITY,
                },
                "cm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        ctm = m.multiply(&ctm);
                    }
                }
                "BT" => {
                    text.matrix = Matrix::IDENTITY;
                    text.line_matrix = Matrix::IDENTITY;
                }
                "Tf" => {
                    if let Some(Object::Name(name)) = operands.first() {
                        text.font = name.clone();
                    }
                    text.font_size = num(1).unwrap_or(text.font_size);
                }
                "TL" => text.leading = num(0).unwrap_or(text.leading),
                "Ts" => text.rise = num(0).unwrap_or(0.0),
                "Td" => text.move_line(num(0).unwrap_or(0.0), num(1).unwrap_or(0.0)),
                "TD" => {
                    let ty = num(1).unwrap_or(0.0);
                    text.leading = -ty;
                    text.move_line(num(0).unwrap_or(0.0), ty);
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        text.matrix = m;
                        text.line_matrix = m;
                    }
                }
                "T*" => text.next_line(),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let decoded = self.decode(fonts, &text.font, bytes);
                        self.show(&mut runs, &mut text, &ctm, decoded, 0.0);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operands.first() {
                        let (decoded, adjust) = self.decode_tj(fonts, &text.font, items);
                        self.show(&mut runs, &mut text, &ctm, decoded, adjust);
                    }
                }
                "'" | "\"" => {
                    text.next_line();
                    let idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = operands.get(idx) {
                        let decoded = self.decode(fonts, &text.font, bytes);
                        self.show(&mut runs, &mut text, &ctm, decoded, 0.0);
                    }
                }
                _ => {}
            }
        }

        Ok(runs)
    }

    /// Emit a run for a shown string and advance the text matrix past it.
    fn show(
        &self,
        runs: &mut Vec<TextRun>,
        text: &mut TextState,
        ctm: &Matrix,
        decoded: String,
        tj_adjust: f32,
    ) {
        let chars = decoded.chars().count() as f32;
        // Advance in unscaled text space units.
        let advance = chars * AVG_GLYPH_WIDTH * text.font_size - tj_adjust / 1000.0 * text.font_size;

        let base = text.matrix.multiply(ctm);
        let rendering = Matrix([
            text.font_size,
            0.0,
            0.0,
            text.font_size,
            0.0,
            text.rise,
        ])
        .multiply(&base);

        let normalized: String = decoded.nfc().collect();
        if !normalized.trim().is_empty() {
            let width = advance * base.horizontal_scale();
            runs.push(TextRun::from_transform(normalized, rendering.0, Some(width)));
        }

        text.matrix = Matrix::translation(advance, 0.0).multiply(&text.matrix);
    }

    fn decode(&self, fonts: &BTreeMap<Vec<u8>, &Dictionary>, font: &[u8], bytes: &[u8]) -> String {
        let encoding = fonts
            .get(font)
            .and_then(|f| f.get_font_encoding(&self.doc).ok());
        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    /// Decode a TJ array. Returns the text and the sum of the numeric
    /// adjustments; large negative adjustments between strings become word
    /// spaces.
    fn decode_tj(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font: &[u8],
        items: &[Object],
    ) -> (String, f32) {
        let mut combined = String::new();
        let mut total_adjust = 0.0;
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(fonts, font, bytes)),
                other => {
                    if let Some(n) = get_number(other) {
                        total_adjust += n;
                        if -n > TJ_SPACE_THRESHOLD
                            && !combined.is_empty()
                            && !combined.ends_with(char::is_whitespace)
                        {
                            combined.push(' ');
                        }
                    }
                }
            }
        }
        (combined, total_adjust)
    }

    fn info_string(&self, key: &[u8]) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok()?,
            Object::Dictionary(d) => d,
            _ => return None,
        };
        match self.resolve(dict.get(key).ok()?) {
            Object::String(bytes, _) => Some(decode_text_simple(bytes)),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
            _ => None,
        }
    }
}

impl TextRunProvider for LopdfProvider {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> std::result::Result<PageRuns, ExtractionError> {
        self.extract_page(number)
            .map_err(|e| ExtractionError::new(number, e.to_string()))
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            page_count: self.page_count(),
            title: self.info_string(b"Title").filter(|t| !t.trim().is_empty()),
            pdf_version: Some(self.version()),
            created: self
                .info_string(b"CreationDate")
                .and_then(|d| parse_pdf_date(&d)),
        }
    }
}

/// Graphics state saved by `q`: the CTM plus the text state parameters.
/// The text and line matrices are not part of it.
#[derive(Debug, Clone)]
struct SavedState {
    ctm: Matrix,
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
    rise: f32,
}

impl SavedState {
    fn capture(ctm: Matrix, text: &TextState) -> Self {
        Self {
            ctm,
            font: text.font.clone(),
            font_size: text.font_size,
            leading: text.leading,
            rise: text.rise,
        }
    }

    /// Write the saved parameters back into `text` and return the CTM.
    fn restore(self, text: &mut TextState) -> Matrix {
        text.font = self.font;
        text.font_size = self.font_size;
        text.leading = self.leading;
        text.rise = self.rise;
        self.ctm
    }
}

/// Text object state between `BT` and `ET`.
#[derive(Debug, Clone)]
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
    rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            font: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }
}

/// A PDF affine matrix `[a b c d e f]`, applied to row vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let mut m = [0.0; 6];
        for (slot, obj) in m.iter_mut().zip(operands) {
            *slot = get_number(obj)?;
        }
        Some(Matrix(m))
    }

    /// `self × other`.
    fn multiply(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    fn horizontal_scale(&self) -> f32 {
        let [a, b, ..] = self.0;
        a.hypot(b)
    }
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decode a byte string when no font encoding is available: UTF-16BE with
/// BOM, then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSS...).
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);
    let field = |range: std::ops::Range<usize>, default: u32| {
        s.get(range).and_then(|v| v.parse().ok()).unwrap_or(default)
    };

    let year: i32 = s.get(0..4)?.parse().ok()?;
    chrono::NaiveDate::from_ymd_opt(year, field(4..6, 1), field(6..8, 1))
        .and_then(|date| date.and_hms_opt(field(8..10, 0), field(10..12, 0), field(12..14, 0)))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_matrix_multiply() {
        let scale = Matrix([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        let moved = Matrix::translation(10.0, 20.0).multiply(&scale);
        assert_eq!(moved.0, [2.0, 0.0, 0.0, 2.0, 20.0, 40.0]);
        assert_eq!(Matrix::IDENTITY.multiply(&moved), moved);
    }

    #[test]
    fn test_text_state_next_line() {
        let mut state = TextState::default();
        state.move_line(72.0, 700.0);
        state.leading = 14.0;
        state.next_line();
        assert_eq!(state.matrix.0[4], 72.0);
        assert_eq!(state.matrix.0[5], 686.0);
    }

    #[test]
    fn test_next_line_without_leading() {
        let mut state = TextState::default();
        state.font_size = 10.0;
        state.move_line(72.0, 700.0);
        state.next_line();
        assert_eq!(state.matrix.0[5], 688.0);
    }

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20240115103045+09'00'").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);

        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!(date.month(), 1);
        assert!(parse_pdf_date("garbage").is_none());
    }

    #[test]
    fn test_from_bytes_rejects_non_pdf() {
        assert!(matches!(
            LopdfProvider::from_bytes(b"not a pdf at all"),
            Err(Error::UnknownFormat)
        ));
    }
}
