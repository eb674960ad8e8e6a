//! PDF rendering and output tests.
//!
//! Run with: `cargo test --features pdf --test pdf_tests`

#![cfg(feature = "pdf")]

use chrono::NaiveDate;
use lopdf::content::Content;
use lopdf::{Document, Object};
use rachunek::compose::{compose, render};
use rachunek::core::*;
use rachunek::i18n::Catalog;
use rachunek::pdf::{PageConfig, PdfDocument, generate};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(items: usize) -> BillingRecord {
    let mut builder = BillingRecordBuilder::new("01/11/2020", date(2020, 11, 1))
        .currency("PLN")
        .seller(
            PartyBuilder::new("John Snow Co.")
                .address("South Tower 1")
                .city("Winterfell")
                .postal_code("12-345")
                .country("Westeros")
                .vat_number("NS 01234567")
                .build(),
        )
        .buyer(PartyBuilder::new("Lannister Ltd.").city("Casterly Rock").build())
        .payment(PaymentInfo::new("PL 61 1090 1014", date(2020, 11, 15)));
    for i in 0..items {
        builder = builder.add_item(
            LineItemBuilder::new(format!("Consulting, week {i}"), dec!(1000))
                .tax(dec!(0.23))
                .localized("pl", format!("Doradztwo, tydzień {i}"))
                .build(),
        );
    }
    builder.build().unwrap()
}

fn render_pdf(record: &BillingRecord, language: &str) -> Vec<u8> {
    let blocks = compose(record, &Catalog::builtin(), &language.into());
    let mut doc = PdfDocument::default();
    render(&blocks, &mut doc);
    doc.finish().unwrap()
}

/// Every string drawn with `Tj` on the first page, decoded as Latin-1.
fn first_page_strings(doc: &Document) -> Vec<String> {
    let page_id = *doc.get_pages().values().next().unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(bytes.iter().map(|b| char::from(*b)).collect()),
            _ => None,
        })
        .collect()
}

#[test]
fn short_invoice_is_one_a4_page() {
    let bytes = render_pdf(&record(2), "en");
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    let strings = first_page_strings(&doc);
    assert_eq!(strings[0], "INVOICE");
    assert!(strings.contains(&"Date: 1/11/2020".to_string()), "{strings:?}");
    assert!(strings.contains(&"2460.00 PLN".to_string()), "{strings:?}");
    assert!(strings.contains(&"Bank Transfer".to_string()), "{strings:?}");
}

#[test]
fn polish_invoice_is_transliterated() {
    let bytes = render_pdf(&record(1), "pl");
    let doc = Document::load_mem(&bytes).unwrap();
    let strings = first_page_strings(&doc);

    assert_eq!(strings[0], "FAKTURA");
    assert!(strings.contains(&"PLATNOSC".to_string()), "{strings:?}");
    assert!(strings.contains(&"Doradztwo, tydzien 0".to_string()), "{strings:?}");
}

#[test]
fn long_invoice_spans_several_pages() {
    let bytes = render_pdf(&record(120), "en");
    let doc = Document::load_mem(&bytes).unwrap();
    assert!(doc.get_pages().len() >= 3);
}

#[test]
fn smaller_page_config_paginates_earlier() {
    let record = record(20);
    let blocks = compose(&record, &Catalog::builtin(), &"en".into());

    let mut a4 = PdfDocument::default();
    render(&blocks, &mut a4);
    let mut a6 = PdfDocument::new(PageConfig {
        width: 298.0,
        height: 420.0,
        margin: 20.0,
        ..PageConfig::A4
    });
    render(&blocks, &mut a6);

    assert_eq!(a4.page_count(), 1);
    assert!(a6.page_count() > 1);
}

#[test]
fn generate_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("invoice.pdf");

    generate(&record(3), &Catalog::builtin(), &"en".into(), &out).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec!["invoice.pdf"]);
}

#[test]
fn generate_into_missing_directory_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("invoice.pdf");

    let err = generate(&record(1), &Catalog::builtin(), &"en".into(), &out).unwrap_err();

    assert!(matches!(err, RachunekError::Io { .. }), "{err}");
    assert!(!out.exists());
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("invoice.pdf");
    std::fs::write(&out, b"old").unwrap();

    PdfDocument::default().save(&out).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn save_leaves_unrelated_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("invoice.pdf");
    let neighbour = dir.path().join("invoice.pdf.tmp");
    std::fs::write(&neighbour, b"keep me").unwrap();

    generate(&record(1), &Catalog::builtin(), &"en".into(), &out).unwrap();

    assert_eq!(std::fs::read(&neighbour).unwrap(), b"keep me");
    let mut names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    names.sort();
    assert_eq!(names, vec!["invoice.pdf", "invoice.pdf.tmp"]);
}

#[test]
fn long_payment_details_are_not_cut_off() {
    let mut record = record(1);
    record.payment.account_number = (0..80)
        .map(|i| format!("account {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let bytes = render_pdf(&record, "en");
    let doc = Document::load_mem(&bytes).unwrap();
    assert!(doc.get_pages().len() >= 2);

    let drawn: usize = doc
        .get_pages()
        .values()
        .map(|id| {
            let content = Content::decode(&doc.get_page_content(*id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter(|op| {
                    matches!(op.operands.first(), Some(Object::String(text, _)) if text.windows(8).any(|w| w == b"account "))
                })
                .count()
        })
        .sum();
    assert_eq!(drawn, 80);
}
