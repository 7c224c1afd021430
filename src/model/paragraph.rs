//! Paragraph-level types.

use serde::{Deserialize, Serialize};

/// A paragraph reconstructed from one line of positioned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// The paragraph text
    pub text: String,

    /// Text alignment
    pub alignment: Alignment,

    /// Font size in half-points (the Word size unit, so 24 = 12pt)
    pub font_size: f32,
}

impl Paragraph {
    /// Create a left-aligned paragraph.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Left,
            font_size,
        }
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Font size converted to points.
    pub fn font_size_pt(&self) -> f32 {
        self.font_size / 2.0
    }

    /// Check if the paragraph is blank.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
}

impl Alignment {
    /// CSS `text-align` keyword.
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_defaults() {
        let p = Paragraph::new("Hello", 24.0);
        assert_eq!(p.alignment, Alignment::Left);
        assert_eq!(p.font_size_pt(), 12.0);
        assert!(!p.is_blank());
    }

    #[test]
    fn test_alignment_css() {
        assert_eq!(Alignment::Center.as_css(), "center");
        assert_eq!(Alignment::default().as_css(), "left");
    }
}
