use crate::font::split_text_to_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

impl FontFace {
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Oblique => "Helvetica-Oblique",
        }
    }

    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Oblique => "F3",
        }
    }

    pub const ALL: [FontFace; 3] = [Self::Regular, Self::Bold, Self::Oblique];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    /// Points.
    pub size: f32,
    /// Grey level, 0 (black) to 255 (white).
    pub gray: u8,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32) -> Self {
        Self { face, size, gray: 0 }
    }

    pub const fn with_gray(mut self, gray: u8) -> Self {
        self.gray = gray;
        self
    }
}

/// A page-oriented drawing surface addressed in millimetres from the top-left corner.
pub trait PageCanvas {
    fn page_width(&self) -> f32;

    /// Draws `lines` with their first baseline at `y`.
    fn draw_lines(&mut self, lines: &[String], x: f32, y: f32, style: TextStyle);

    fn add_page(&mut self);

    fn split_text(&self, text: &str, max_width: f32, style: TextStyle) -> Vec<String> {
        split_text_to_size(text, style.size, max_width)
    }
}
