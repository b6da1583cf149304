use paper_core::{partition, Question, StructuredData, Unit};
use paper_render::{render_question_paper, write_question_paper, OUTPUT_FILE_NAME};

fn unit(id: &str, count: usize, question_words: usize) -> Unit {
    Unit {
        unit: id.to_string(),
        questions: (1..=count)
            .map(|n| Question {
                unit: Some(id.to_string()),
                question: format!("{id} question {n}: {}", "elaborate ".repeat(question_words)),
                blooms_level: "Evaluate".to_string(),
                answer: format!("Answer {n} for {id}"),
            })
            .collect(),
    }
}

#[test]
fn exports_file_with_fixed_name() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join(OUTPUT_FILE_NAME);

    let units = StructuredData::from_json_slice(
        br#"{"structuredData":[{"unit":"U1","questions":[{"question":"q1","bloomsLevel":"Remember","answer":"a1"}]}]}"#,
    )
    .unwrap();
    let pages = write_question_paper(&partition(&units), &output).unwrap();

    assert_eq!(pages, 1);
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(output.file_name().unwrap(), "Question_Paper.pdf");
}

#[test]
fn long_papers_span_several_pages() {
    // Eight units give sixteen Part A questions of several wrapped lines each.
    let units = (1..=8)
        .map(|n| unit(&format!("U{n}"), 3, 40))
        .collect::<Vec<_>>();
    let paper = partition(&units);
    assert_eq!(paper.part_a.len(), 16);
    assert_eq!(paper.part_b.len(), 5);

    let rendered = render_question_paper(&paper).unwrap();
    assert!(rendered.pages > 1);

    let document = lopdf::Document::load_mem(&rendered.bytes).unwrap();
    assert_eq!(document.get_pages().len(), rendered.pages);
}

#[test]
fn writing_into_missing_directory_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join(OUTPUT_FILE_NAME);

    let error = write_question_paper(&partition(&[]), &output).unwrap_err();
    assert!(error.to_string().contains("missing"));
}
