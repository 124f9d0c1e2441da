//! Extraction against real PDF bytes built in memory

use lease_extract::{ExtractError, ExtractionStrategy, PageWalkStrategy, TextExtractor};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Write;

/// Build a PDF with one page per entry of `pages`, each showing its text
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[test]
fn page_walk_reads_every_page() {
    let bytes = build_pdf(&["Residential", "Tenancy"]);
    let pages = PageWalkStrategy.extract_pages(&bytes).unwrap();

    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("Residential"));
    assert!(pages[1].contains("Tenancy"));
}

#[test]
fn default_extractor_reads_pdf_file() {
    let bytes = build_pdf(&["Residential"]);
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(&bytes).unwrap();

    let result = TextExtractor::default().extract_file(file.path()).unwrap();

    assert!(result.text.contains("Residential"));
    assert_eq!(result.text, result.text.trim());
    assert_eq!(result.page_count, 1);
    assert_eq!(result.original_length, bytes.len());
}

#[test]
fn corrupt_pdf_fails_with_extraction_error() {
    let err = TextExtractor::default()
        .extract_bytes(b"%PDF-1.4\nthis is not really a pdf", "broken.pdf")
        .unwrap_err();

    match err {
        ExtractError::Extraction {
            primary_strategy,
            fallback_strategy,
            ..
        } => {
            assert_eq!(primary_strategy, "layout");
            assert_eq!(fallback_strategy, "page-walk");
        }
        other => panic!("expected extraction error, got {other:?}"),
    }
}
