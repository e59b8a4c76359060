use crate::document::UploadedDocument;

/// Supported document formats, keyed by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Plain,
    Pdf,
    Docx,
}

/// Extension registry. Supporting a new format means adding a row here and
/// an arm in `extract_as`; the dispatcher itself never changes.
const FORMATS: &[(&str, DocumentFormat)] = &[
    ("txt", DocumentFormat::Plain),
    ("md", DocumentFormat::Plain),
    ("pdf", DocumentFormat::Pdf),
    ("docx", DocumentFormat::Docx),
];

impl DocumentFormat {
    /// Look up the format for a filename. Extensions match
    /// case-insensitively, so `.PDF` resolves the same as `.pdf`.
    pub fn for_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        let ext = ext.to_lowercase();
        FORMATS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, format)| *format)
    }
}

/// Outcome of text extraction for a single document.
///
/// `Unsupported` means "this document produces no text" — callers skip it
/// and move on; it is not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    Unsupported,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("'{filename}' is not valid UTF-8: {source}")]
    Utf8 {
        filename: String,
        source: std::str::Utf8Error,
    },
    #[error("PDF parse error in '{filename}': {message}")]
    Pdf { filename: String, message: String },
    #[error("DOCX parse error in '{filename}': {message}")]
    Docx { filename: String, message: String },
}

/// Extract plain text from an uploaded document.
///
/// Read-only over the document bytes. Unknown extensions yield
/// `Extraction::Unsupported`; a supported document that cannot be decoded
/// or parsed is a hard error.
pub fn extract(document: &UploadedDocument) -> Result<Extraction, ExtractError> {
    let Some(format) = DocumentFormat::for_filename(&document.filename) else {
        return Ok(Extraction::Unsupported);
    };
    extract_as(format, document).map(Extraction::Text)
}

fn extract_as(
    format: DocumentFormat,
    document: &UploadedDocument,
) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Plain => extract_plain(document),
        DocumentFormat::Pdf => extract_pdf(document),
        DocumentFormat::Docx => extract_docx(document),
    }
}

/// `.txt` / `.md`: strict UTF-8 decode, content passed through verbatim.
/// Invalid bytes are an error, never lossy replacement.
fn extract_plain(document: &UploadedDocument) -> Result<String, ExtractError> {
    std::str::from_utf8(&document.bytes)
        .map(str::to_owned)
        .map_err(|source| ExtractError::Utf8 {
            filename: document.filename.clone(),
            source,
        })
}

/// `.pdf`: page texts concatenated in page order with no separator. Pages
/// that error or yield no text contribute nothing.
fn extract_pdf(document: &UploadedDocument) -> Result<String, ExtractError> {
    let pdf = lopdf::Document::load_mem(&document.bytes).map_err(|e| ExtractError::Pdf {
        filename: document.filename.clone(),
        message: e.to_string(),
    })?;

    let mut text = String::new();
    for (page_number, _page_id) in pdf.get_pages() {
        if let Ok(page_text) = pdf.extract_text(&[page_number]) {
            text.push_str(&page_text);
        }
    }
    Ok(text)
}

/// `.docx`: paragraph texts in document order, one newline after each
/// paragraph. Empty paragraphs contribute a bare newline.
fn extract_docx(document: &UploadedDocument) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(&document.bytes).map_err(|e| ExtractError::Docx {
        filename: document.filename.clone(),
        message: format!("{e:?}"),
    })?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            text.push_str(&paragraph_text(paragraph));
            text.push('\n');
        }
    }
    Ok(text)
}

/// Runs within a paragraph are parts of the same sentence, so their text
/// nodes concatenate with no separator.
fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(filename: &str, bytes: &[u8]) -> UploadedDocument {
        UploadedDocument::new(filename, bytes.to_vec())
    }

    fn sample_docx(paragraphs: &[&str]) -> Vec<u8> {
        use docx_rs::{Docx, Paragraph, Run};

        let mut docx = Docx::new();
        for text in paragraphs {
            let mut paragraph = Paragraph::new();
            if !text.is_empty() {
                paragraph = paragraph.add_run(Run::new().add_text(*text));
            }
            docx = docx.add_paragraph(paragraph);
        }

        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    fn sample_pdf(lines: &[&str]) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut pdf = Document::with_version("1.5");
        let pages_id = pdf.new_object_id();
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = pdf.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 600.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = pdf.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        pdf.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        pdf.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn txt_roundtrips_verbatim() {
        let extracted = extract(&doc("notes.txt", b"The sky is blue.")).unwrap();
        assert_eq!(extracted, Extraction::Text("The sky is blue.".to_string()));
    }

    #[test]
    fn md_is_plain_text() {
        let extracted = extract(&doc("readme.md", b"# Title\n\nBody")).unwrap();
        assert_eq!(extracted, Extraction::Text("# Title\n\nBody".to_string()));
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::for_filename("Report.PDF"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::for_filename("notes.TXT"),
            Some(DocumentFormat::Plain)
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let extracted = extract(&doc("data.csv", b"a,b,c")).unwrap();
        assert_eq!(extracted, Extraction::Unsupported);
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let extracted = extract(&doc("Makefile", b"all:")).unwrap();
        assert_eq!(extracted, Extraction::Unsupported);
    }

    #[test]
    fn invalid_utf8_txt_is_an_error() {
        let err = extract(&doc("bad.txt", &[0xff, 0xfe, 0x00])).unwrap_err();
        assert!(matches!(err, ExtractError::Utf8 { .. }));
    }

    #[test]
    fn garbage_pdf_is_an_error() {
        let err = extract(&doc("broken.pdf", b"not a pdf at all")).unwrap_err();
        assert!(matches!(err, ExtractError::Pdf { .. }));
    }

    #[test]
    fn garbage_docx_is_an_error() {
        let err = extract(&doc("broken.docx", b"not a zip archive")).unwrap_err();
        assert!(matches!(err, ExtractError::Docx { .. }));
    }

    #[test]
    fn pdf_text_is_extracted_in_page_order() {
        let bytes = sample_pdf(&["The sky is blue."]);
        let Extraction::Text(text) = extract(&doc("sky.pdf", &bytes)).unwrap() else {
            panic!("expected text");
        };
        assert!(text.contains("The sky is blue."), "got: {text:?}");
    }

    #[test]
    fn docx_paragraphs_each_end_with_newline() {
        let bytes = sample_docx(&["First paragraph.", "Second paragraph."]);
        let Extraction::Text(text) = extract(&doc("report.docx", &bytes)).unwrap() else {
            panic!("expected text");
        };
        assert_eq!(text, "First paragraph.\nSecond paragraph.\n");
    }

    #[test]
    fn empty_docx_paragraph_contributes_a_bare_newline() {
        let bytes = sample_docx(&["Above.", "", "Below."]);
        let Extraction::Text(text) = extract(&doc("gaps.docx", &bytes)).unwrap() else {
            panic!("expected text");
        };
        assert_eq!(text, "Above.\n\nBelow.\n");
    }
}
