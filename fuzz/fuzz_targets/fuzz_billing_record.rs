#![no_main]

use libfuzzer_sys::fuzz_target;
use rachunek::compose::compose;
use rachunek::i18n::Catalog;

fuzz_target!(|data: &[u8]| {
    // Must not panic: loader errors are fine, and any record that loads must compose.
    if let Ok(record) = rachunek::core::load_billing_record(data) {
        let _ = compose(&record, &Catalog::builtin(), &"pl".into());
    }
});
