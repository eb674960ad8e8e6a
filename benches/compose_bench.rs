use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use rachunek::compose::{InvoiceComposer, TextSink, compose, render};
use rachunek::core::*;
use rachunek::i18n::Catalog;
use rachunek::pdf::PdfDocument;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 11, 1).unwrap()
}

fn build_record(items: usize) -> BillingRecord {
    let mut builder = BillingRecordBuilder::new("BENCH-001", test_date())
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
        .buyer(
            PartyBuilder::new("Lannister Ltd.")
                .address("Lion Street 7")
                .city("Casterly Rock")
                .postal_code("54-321")
                .country("Westeros")
                .build(),
        )
        .payment(PaymentInfo::new("PL 61 1090 1014", test_date()));

    for i in 1..=items {
        builder = builder.add_item(
            LineItemBuilder::new(format!("Service item {i}"), dec!(120.50))
                .tax(dec!(0.23))
                .localized("pl", format!("Usługa {i}"))
                .build(),
        );
    }

    builder.build().unwrap()
}

fn bench_compose(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let diagnostics = CollectingDiagnostics::new();
    let composer = InvoiceComposer::new(&catalog, &diagnostics);
    let small = build_record(10);
    let large = build_record(1000);
    let pl = LanguageTag::new("pl");

    c.bench_function("compose_10_items", |b| {
        b.iter(|| black_box(composer.compose(black_box(&small), &pl)));
    });
    c.bench_function("compose_1000_items", |b| {
        b.iter(|| black_box(composer.compose(black_box(&large), &pl)));
    });
}

fn bench_render_text(c: &mut Criterion) {
    let blocks = compose(&build_record(10), &Catalog::builtin(), &"en".into());
    c.bench_function("render_text_10_items", |b| {
        b.iter(|| {
            let mut sink = TextSink::new();
            render(black_box(&blocks), &mut sink);
            black_box(sink.finish())
        });
    });
}

fn bench_render_pdf(c: &mut Criterion) {
    let small = compose(&build_record(10), &Catalog::builtin(), &"en".into());
    let large = compose(&build_record(1000), &Catalog::builtin(), &"en".into());

    c.bench_function("render_pdf_10_items", |b| {
        b.iter(|| {
            let mut doc = PdfDocument::default();
            render(black_box(&small), &mut doc);
            black_box(doc.finish())
        });
    });
    c.bench_function("render_pdf_1000_items", |b| {
        b.iter(|| {
            let mut doc = PdfDocument::default();
            render(black_box(&large), &mut doc);
            black_box(doc.finish())
        });
    });
}

criterion_group!(benches, bench_compose, bench_render_text, bench_render_pdf);
criterion_main!(benches);
