//! Named paragraph styles
//!
//! Presentation constants for the consultation report. Sizes and
//! spacing are in points; colors are RGB in the 0.0..=1.0 range.

/// Horizontal alignment of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// A fixed paragraph style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    /// Font size in points
    pub font_size: f32,
    /// Line height in points
    pub leading: f32,
    /// Vertical gap before the paragraph, in points
    pub space_before: f32,
    /// Vertical gap after the paragraph, in points
    pub space_after: f32,
    /// Use the bold face
    pub bold: bool,
    /// Horizontal alignment
    pub alignment: Alignment,
    /// Fill color (r, g, b)
    pub color: (f32, f32, f32),
}

/// Report title line
pub const TITLE: ParagraphStyle = ParagraphStyle {
    font_size: 20.0,
    leading: 24.0,
    space_before: 0.0,
    space_after: 20.0,
    bold: true,
    alignment: Alignment::Center,
    color: (0.0, 0.0, 0.0),
};

/// Section heading ("Pregunta del Usuario:", ...)
pub const HEADING: ParagraphStyle = ParagraphStyle {
    font_size: 14.0,
    leading: 18.0,
    space_before: 20.0,
    space_after: 10.0,
    bold: true,
    alignment: Alignment::Left,
    color: (0.0, 0.0, 0.0),
};

/// Body text
pub const BODY: ParagraphStyle = ParagraphStyle {
    font_size: 12.0,
    leading: 14.0,
    space_before: 0.0,
    space_after: 10.0,
    bold: false,
    alignment: Alignment::Left,
    color: (0.0, 0.0, 0.0),
};

/// Footer line
pub const FOOTER: ParagraphStyle = ParagraphStyle {
    font_size: 10.0,
    leading: 12.0,
    space_before: 36.0,
    space_after: 0.0,
    bold: false,
    alignment: Alignment::Center,
    color: (0.53, 0.53, 0.53),
};
