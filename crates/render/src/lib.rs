pub mod canvas;
pub mod error;
pub mod font;
pub mod layout;
pub mod pdf;

use std::path::Path;

use paper_core::Partition;
use tracing::{info, instrument};

pub use canvas::{FontFace, PageCanvas, TextStyle};
pub use error::RenderError;
pub use layout::{LayoutSummary, QuestionPaperLayout};
pub use pdf::{LopdfCanvas, PageGeometry};

/// File name of the exported question paper.
pub const OUTPUT_FILE_NAME: &str = "Question_Paper.pdf";

pub struct RenderedPaper {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Lays out both sections on A4 pages and serializes the PDF.
#[instrument(skip_all, fields(part_a = partition.part_a.len(), part_b = partition.part_b.len()))]
pub fn render_question_paper(partition: &Partition) -> Result<RenderedPaper, RenderError> {
    let mut canvas = LopdfCanvas::new(PageGeometry::a4());
    let summary = QuestionPaperLayout::new().render(partition, &mut canvas);
    let bytes = canvas.finish()?;

    info!(pages = summary.pages, bytes = bytes.len(), "question paper rendered");
    Ok(RenderedPaper {
        bytes,
        pages: summary.pages,
    })
}

/// Renders and writes the paper to `path`, returning the page count.
pub fn write_question_paper(partition: &Partition, path: &Path) -> Result<usize, RenderError> {
    let rendered = render_question_paper(partition)?;
    std::fs::write(path, &rendered.bytes).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(rendered.pages)
}
