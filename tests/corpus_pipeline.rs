//! End-to-end run over a generated document tree: walk, extract, segment,
//! then write CSV and XLSX.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};
use doccorpus::corpus::{CorpusBuilder, WalkOptions};
use doccorpus::extract::{ExtractorRegistry, PdfExtractor};
use doccorpus::models::{FileType, Location};
use doccorpus::output::{TabularWriter, HEADERS};
use doccorpus::segment::{AbbreviationModel, SentenceSegmenter};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

fn write_package(path: &Path, parts: &[(&str, String)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, content) in parts {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn write_docx(path: &Path) {
    let document = format!(
        r#"<w:document xmlns:w="{W_NS}"><w:body>
             <w:p><w:r><w:t>Dr. Smith wrote the memo. It was approved.</w:t></w:r></w:p>
             <w:p/>
           </w:body></w:document>"#
    );
    let comments = format!(
        r#"<w:comments xmlns:w="{W_NS}"><w:comment w:id="0"><w:p><w:r><w:t>Needs a date</w:t></w:r></w:p></w:comment></w:comments>"#
    );
    write_package(
        path,
        &[
            ("word/document.xml", document),
            ("word/comments.xml", comments),
        ],
    );
}

fn write_pptx(path: &Path) {
    let slide = |text: &str| {
        format!(
            r#"<p:sld xmlns:a="{A_NS}" xmlns:p="{P_NS}"><p:cSld><p:spTree>
                 <p:sp><p:txBody><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>
               </p:spTree></p:cSld></p:sld>"#
        )
    };
    write_package(
        path,
        &[
            ("ppt/slides/slide1.xml", slide("Welcome")),
            ("ppt/slides/slide2.xml", slide("Revenue grew. Costs fell!")),
        ],
    );
}

fn write_xlsx(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Sheet1").unwrap();
    sheet.write_string(0, 0, "a").unwrap();
    sheet.write_string(0, 1, "b").unwrap();
    workbook.save(path).unwrap();
}

#[test]
fn test_directory_to_tabular_outputs() {
    let input = tempdir().unwrap();
    let nested = input.path().join("decks");
    std::fs::create_dir(&nested).unwrap();

    write_docx(&input.path().join("memo.docx"));
    write_xlsx(&input.path().join("numbers.xlsx"));
    write_pptx(&nested.join("talk.pptx"));
    std::fs::write(input.path().join("notes.txt"), "ignored").unwrap();
    std::fs::write(input.path().join("corrupt.pptx"), "not a zip").unwrap();

    let registry = ExtractorRegistry::standard(PdfExtractor::new(None));
    let segmenter = SentenceSegmenter::new(AbbreviationModel::builtin_english());
    let (records, summary) = CorpusBuilder::new(&registry, &segmenter)
        .with_options(WalkOptions::default())
        .build(input.path())
        .unwrap();

    // Name order: corrupt.pptx, decks/talk.pptx, memo.docx, notes.txt, numbers.xlsx
    let rows: Vec<(&str, FileType, String, &str)> = records
        .iter()
        .map(|r| {
            (
                r.file_name.as_str(),
                r.file_type,
                r.location.to_string(),
                r.sentence.as_str(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("talk.pptx", FileType::Pptx, "1".to_string(), "Welcome"),
            ("talk.pptx", FileType::Pptx, "2".to_string(), "Revenue grew."),
            ("talk.pptx", FileType::Pptx, "2".to_string(), "Costs fell!"),
            (
                "memo.docx",
                FileType::Docx,
                String::new(),
                "Dr. Smith wrote the memo."
            ),
            ("memo.docx", FileType::Docx, String::new(), "It was approved."),
            ("numbers.xlsx", FileType::Xlsx, "Sheet1:1".to_string(), "a | b"),
        ]
    );
    assert_eq!(records[3].comments.as_deref(), Some("Needs a date"));
    assert_eq!(records[0].comments, None);
    assert_eq!(records[0].location, Location::Slide(1));

    assert_eq!(summary.files_seen, 5);
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);

    let output = tempdir().unwrap();
    let writer = TabularWriter::new(
        output.path().join("corpus.csv"),
        output.path().join("corpus.xlsx"),
    );
    writer.write(&records).unwrap();

    let csv_rows: Vec<Vec<String>> = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(writer.csv_path())
        .unwrap()
        .records()
        .map(|row| row.unwrap().iter().map(str::to_string).collect())
        .collect();

    let mut workbook: Xlsx<_> = open_workbook(writer.xlsx_path()).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    let xlsx_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    assert_eq!(csv_rows.len(), records.len() + 1);
    assert_eq!(csv_rows[0], HEADERS.map(String::from).to_vec());
    assert_eq!(csv_rows[4][5], "Needs a date");
    assert_eq!(csv_rows, xlsx_rows);
}
