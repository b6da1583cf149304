use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::canvas::{FontFace, PageCanvas, TextStyle};
use crate::error::RenderError;
use crate::font::MM_PER_PT;
use crate::layout::TITLE;

/// Line spacing inside one wrapped block, as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;
const PRODUCER: &str = concat!("paper-render ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Millimetres.
    pub width: f32,
    /// Millimetres.
    pub height: f32,
}

impl PageGeometry {
    pub const fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
        }
    }

    fn width_pt(&self) -> f32 {
        self.width / MM_PER_PT
    }

    fn height_pt(&self) -> f32 {
        self.height / MM_PER_PT
    }
}

/// In-memory PDF canvas. Pages are buffered as content operations and assembled into a
/// `lopdf` object graph by [`LopdfCanvas::finish`].
pub struct LopdfCanvas {
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
}

impl LopdfCanvas {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Vec::new()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for face in FontFace::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = document.add_object(dictionary! { "Font" => fonts });

        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            self.geometry.width_pt().into(),
            self.geometry.height_pt().into(),
        ];

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let stream = Stream::new(lopdf::Dictionary::new(), content.encode()?);
            let content_id = document.add_object(stream);
            let page_id: ObjectId = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => media_box,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let created = Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        let info_id = document.add_object(dictionary! {
            "Title" => Object::string_literal(TITLE),
            "Producer" => Object::string_literal(PRODUCER),
            "CreationDate" => Object::string_literal(created),
        });
        document.trailer.set("Info", info_id);

        document.compress();

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).map_err(lopdf::Error::from)?;
        Ok(bytes)
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl PageCanvas for LopdfCanvas {
    fn page_width(&self) -> f32 {
        self.geometry.width
    }

    fn draw_lines(&mut self, lines: &[String], x: f32, y: f32, style: TextStyle) {
        let x_pt = x / MM_PER_PT;
        let baseline_pt = self.geometry.height_pt() - y / MM_PER_PT;
        let leading = style.size * LINE_HEIGHT_FACTOR;
        let gray = f32::from(style.gray) / 255.0;

        let ops = self.current_page();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![style.face.resource_name().into(), style.size.into()],
        ));
        ops.push(Operation::new("g", vec![gray.into()]));
        ops.push(Operation::new("TL", vec![leading.into()]));
        ops.push(Operation::new("Td", vec![x_pt.into(), baseline_pt.into()]));
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                ops.push(Operation::new("T*", vec![]));
            }
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(win_ansi_bytes(line), StringFormat::Literal)],
            ));
        }
        ops.push(Operation::new("ET", vec![]));
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }
}

/// Latin-1 subset of WinAnsi; anything else becomes `?`.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            code @ 0x20..=0x7e | code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        })
        .collect()
}
