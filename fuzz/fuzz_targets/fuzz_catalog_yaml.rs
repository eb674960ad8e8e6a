#![no_main]

use libfuzzer_sys::fuzz_target;
use rachunek::i18n::Catalog;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Catalog::new().add_yaml("en", s);
    }
});
