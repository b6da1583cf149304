use paper_core::{Partition, Question};
use tracing::debug;

use crate::canvas::{FontFace, PageCanvas, TextStyle};

pub const MARGIN: f32 = 10.0;
pub const TITLE: &str = "Generated Questions";
const TITLE_Y: f32 = 10.0;
const CONTENT_START_Y: f32 = 20.0;
const SECTION_ADVANCE: f32 = 10.0;
const LINE_ADVANCE: f32 = 6.0;
const QUESTION_GAP: f32 = 4.0;
/// Past this cursor position the next block starts on a fresh page.
pub const PAGE_BREAK_Y: f32 = 280.0;
const FRESH_PAGE_Y: f32 = 10.0;

const TITLE_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 16.0);
const SECTION_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 14.0);
const QUESTION_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 12.0);
const BLOOMS_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 10.0).with_gray(100);
const ANSWER_STYLE: TextStyle = TextStyle::new(FontFace::Oblique, 12.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSummary {
    pub pages: usize,
    pub final_y: f32,
}

/// Sequential layout of the question paper: title, then each section with its
/// numbered questions, moving a single cursor down the page.
#[derive(Debug, Clone, Copy)]
pub struct QuestionPaperLayout {
    y: f32,
    pages: usize,
}

impl Default for QuestionPaperLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionPaperLayout {
    pub fn new() -> Self {
        Self {
            y: CONTENT_START_Y,
            pages: 1,
        }
    }

    pub fn render<C: PageCanvas>(mut self, partition: &Partition, canvas: &mut C) -> LayoutSummary {
        canvas.draw_lines(&[TITLE.to_string()], MARGIN, TITLE_Y, TITLE_STYLE);
        self.y = CONTENT_START_Y;

        let [(part_a_title, part_a), (part_b_title, part_b)] = partition.sections();
        self.add_section(canvas, part_a_title, part_a);
        self.break_page_if_full(canvas);
        self.add_section(canvas, part_b_title, part_b);

        LayoutSummary {
            pages: self.pages,
            final_y: self.y,
        }
    }

    fn add_section<C: PageCanvas>(&mut self, canvas: &mut C, title: &str, questions: &[Question]) {
        let text_width = canvas.page_width() - MARGIN * 2.0;

        canvas.draw_lines(&[title.to_string()], MARGIN, self.y, SECTION_STYLE);
        self.y += SECTION_ADVANCE;

        for (index, question) in questions.iter().enumerate() {
            let question_text = format!("{}. {}", index + 1, question.question);
            let lines = canvas.split_text(&question_text, text_width, QUESTION_STYLE);
            canvas.draw_lines(&lines, MARGIN, self.y, QUESTION_STYLE);
            self.y += lines.len() as f32 * LINE_ADVANCE;

            let blooms = format!("Bloom's Level: {}", question.blooms_level);
            canvas.draw_lines(&[blooms], MARGIN, self.y, BLOOMS_STYLE);
            self.y += LINE_ADVANCE;

            let answer_text = format!("Answer: {}", question.answer);
            let lines = canvas.split_text(&answer_text, text_width, ANSWER_STYLE);
            canvas.draw_lines(&lines, MARGIN, self.y, ANSWER_STYLE);
            self.y += lines.len() as f32 * LINE_ADVANCE;

            self.y += QUESTION_GAP;
            self.break_page_if_full(canvas);
        }
    }

    fn break_page_if_full<C: PageCanvas>(&mut self, canvas: &mut C) {
        if self.y > PAGE_BREAK_Y {
            canvas.add_page();
            self.pages += 1;
            self.y = FRESH_PAGE_Y;
            debug!(page = self.pages, "page break");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Drawn {
        page: usize,
        y: f32,
        text: String,
        lines: usize,
        style: TextStyle,
    }

    #[derive(Default)]
    struct RecordingCanvas {
        page: usize,
        drawn: Vec<Drawn>,
    }

    impl PageCanvas for RecordingCanvas {
        fn page_width(&self) -> f32 {
            210.0
        }

        fn draw_lines(&mut self, lines: &[String], _x: f32, y: f32, style: TextStyle) {
            self.drawn.push(Drawn {
                page: self.page,
                y,
                text: lines.join("\n"),
                lines: lines.len(),
                style,
            });
        }

        fn add_page(&mut self) {
            self.page += 1;
        }
    }

    fn question(text: &str) -> Question {
        Question {
            unit: Some("U1".to_string()),
            question: text.to_string(),
            blooms_level: "Apply".to_string(),
            answer: "Yes".to_string(),
        }
    }

    fn render(partition: &Partition) -> (LayoutSummary, RecordingCanvas) {
        let mut canvas = RecordingCanvas::default();
        let summary = QuestionPaperLayout::new().render(partition, &mut canvas);
        (summary, canvas)
    }

    #[test]
    fn title_and_headers_are_placed_on_the_first_page() {
        let (summary, canvas) = render(&Partition::default());

        assert_eq!(summary.pages, 1);
        assert_eq!(canvas.drawn[0].text, TITLE);
        assert_eq!(canvas.drawn[0].y, 10.0);
        assert_eq!(canvas.drawn[1].text, "Part A:");
        assert_eq!(canvas.drawn[1].y, 20.0);
        assert_eq!(canvas.drawn[2].text, "Part B:");
        assert_eq!(canvas.drawn[2].y, 30.0);
        assert_eq!(summary.final_y, 40.0);
    }

    #[test]
    fn one_line_question_advances_cursor_by_twenty_two() {
        let partition = Partition {
            part_a: vec![question("What is a trait?")],
            part_b: Vec::new(),
        };
        let (_, canvas) = render(&partition);

        let texts = canvas.drawn.iter().map(|d| (d.text.as_str(), d.y)).collect::<Vec<_>>();
        assert_eq!(
            texts,
            [
                (TITLE, 10.0),
                ("Part A:", 20.0),
                ("1. What is a trait?", 30.0),
                ("Bloom's Level: Apply", 36.0),
                ("Answer: Yes", 42.0),
                ("Part B:", 52.0),
            ]
        );
        assert_eq!(canvas.drawn[3].style.gray, 100);
        assert_eq!(canvas.drawn[4].style.face, FontFace::Oblique);
    }

    #[test]
    fn wrapped_question_advances_per_line() {
        let long = "word ".repeat(60);
        let partition = Partition {
            part_a: vec![question(long.trim())],
            part_b: Vec::new(),
        };
        let (_, canvas) = render(&partition);

        let question_block = &canvas.drawn[2];
        assert!(question_block.lines > 1);
        assert_eq!(
            canvas.drawn[3].y,
            question_block.y + question_block.lines as f32 * LINE_ADVANCE
        );
    }

    #[test]
    fn page_breaks_after_question_that_passes_threshold() {
        // 20 + 10 + 12 * 22 = 294 > 280 after the twelfth question.
        let questions = (1..=13).map(|n| question(&format!("Q{n}"))).collect::<Vec<_>>();
        let partition = Partition {
            part_a: questions,
            part_b: vec![question("B1")],
        };
        let (summary, canvas) = render(&partition);

        assert_eq!(summary.pages, 2);
        let thirteenth = canvas
            .drawn
            .iter()
            .find(|d| d.text == "13. Q13")
            .unwrap();
        assert_eq!(thirteenth.page, 1);
        assert_eq!(thirteenth.y, 10.0);

        let twelfth = canvas.drawn.iter().find(|d| d.text == "12. Q12").unwrap();
        assert_eq!(twelfth.page, 0);
    }

    #[test]
    fn part_b_header_follows_break_after_last_part_a_question() {
        // The twelfth question takes the cursor to 294; its own check breaks the page.
        let partition = Partition {
            part_a: (1..=12).map(|n| question(&format!("Q{n}"))).collect(),
            part_b: vec![question("B1")],
        };
        let (summary, canvas) = render(&partition);

        let header = canvas.drawn.iter().find(|d| d.text == "Part B:").unwrap();
        assert_eq!(header.page, 1);
        assert_eq!(header.y, 10.0);
        assert_eq!(summary.pages, 2);
    }

    #[test]
    fn cursor_past_threshold_starts_fresh_page() {
        let mut canvas = RecordingCanvas::default();
        let mut layout = QuestionPaperLayout {
            y: PAGE_BREAK_Y + 0.5,
            pages: 1,
        };

        layout.break_page_if_full(&mut canvas);

        assert_eq!(canvas.page, 1);
        assert_eq!(layout.pages, 2);
        assert_eq!(layout.y, 10.0);
    }

    #[test]
    fn cursor_at_threshold_stays_on_page() {
        let mut canvas = RecordingCanvas::default();
        let mut layout = QuestionPaperLayout {
            y: PAGE_BREAK_Y,
            pages: 1,
        };

        layout.break_page_if_full(&mut canvas);

        assert_eq!(canvas.page, 0);
        assert_eq!(layout.pages, 1);
        assert_eq!(layout.y, PAGE_BREAK_Y);
    }
}
