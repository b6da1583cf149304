use html_escape::{encode_double_quoted_attribute, encode_text};
use paper_core::{Question, ViewState};
use url::Url;

const LOADING_TEXT: &str = "Loading...";

pub fn render_view(data_id: &str, view: &ViewState) -> String {
    let body = match view {
        ViewState::Loading => format!("<div>{LOADING_TEXT}</div>"),
        ViewState::Error(view_error) => format!(
            r#"<div style="color: red">{}</div>"#,
            encode_text(&view_error.to_string())
        ),
        ViewState::Ready(_) => {
            let partition = view.partition().unwrap_or_default();
            let mut html = String::new();
            html.push_str("<h1>Extracted Data</h1>\n");
            html.push_str(&format!(
                "<div><a class=\"button\" href=\"{}\" download>Download PDF</a></div>\n",
                encode_double_quoted_attribute(&pdf_href(data_id))
            ));
            for (title, questions) in partition.sections() {
                html.push_str(&render_section(title, questions));
            }
            html
        }
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Question Paper</title></head>\n<body>\n<div class=\"container\">\n{body}\n</div>\n</body>\n</html>\n"
    )
}

fn render_section(title: &str, questions: &[Question]) -> String {
    let mut html = format!("<section>\n<h2>{}</h2>\n<ol>\n", encode_text(title));
    for question in questions {
        html.push_str(&format!(
            "<li><strong>{}</strong><br/><span class=\"blooms\">Bloom's Level: {}</span><br/><em>Answer: {}</em></li>\n",
            encode_text(&question.question),
            encode_text(&question.blooms_level),
            encode_text(&question.answer),
        ));
    }
    html.push_str("</ol>\n</section>\n");
    html
}

/// Absolute path of the PDF download for `data_id`, keeping the id one segment.
fn pdf_href(data_id: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/view/") else {
        return String::new();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(data_id).push("pdf");
    }
    url.path().to_string()
}
