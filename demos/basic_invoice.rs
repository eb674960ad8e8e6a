use std::path::Path;

use rachunek::compose::{TextSink, compose, render};
use rachunek::core::*;
use rachunek::i18n::Catalog;

fn main() -> Result<(), RachunekError> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let record = BillingRecord::from_path(root.join("demos/invoice.yaml"))?;
    let catalog = Catalog::load_dir(root.join("i18n"))?;

    // Plain-text preview of the composed blocks
    for language in ["en", "pl"] {
        let blocks = compose(&record, &catalog, &language.into());
        let mut preview = TextSink::new();
        render(&blocks, &mut preview);
        println!("=== {language} ===\n{}", preview.finish());
    }

    let out = std::env::temp_dir().join("rachunek-demo.pdf");
    rachunek::pdf::generate(&record, &catalog, &"pl".into(), &out)?;
    println!("PDF written to {}", out.display());
    Ok(())
}
