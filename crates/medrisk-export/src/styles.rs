use serde::{Deserialize, Serialize};

/// Document styling for DOCX exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text and list items.
    pub body_font: String,

    pub heading_font: String,

    /// Body text size in points.
    pub body_size: usize,

    /// Heading sizes in points, level 1 to 3.
    pub heading_sizes: [usize; 3],

    /// Page margin in inches, applied on every side.
    pub margin_inches: f64,
}

impl DocumentStyles {
    pub fn heading_size(&self, level: usize) -> usize {
        let index = level.clamp(1, 3) - 1;
        self.heading_sizes[index]
    }

    /// Margin in twentieths of a point, the unit OOXML page margins use.
    pub fn margin_twips(&self) -> i32 {
        (self.margin_inches * 1440.0).round() as i32
    }
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Calibri".to_string(),
            body_size: 11,
            heading_sizes: [18, 14, 12],
            margin_inches: 1.0,
        }
    }
}
