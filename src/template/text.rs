use chrono::NaiveDate;

/// Day without padding, zero-padded month, four-digit year: `1/11/2020`.
pub const DATE_FORMAT: &str = "%-d/%m/%Y";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Upper-case the first letter of every word, leaving the rest untouched.
///
/// A word starts after whitespace or ASCII punctuation; letters, digits and
/// `_` continue a word, so `"o'neil"` becomes `"O'Neil"` and `"x2y"` stays one word.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = is_separator(c);
    }
    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    !c.is_alphanumeric() && c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_use_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2020, 11, 1).unwrap();
        assert_eq!(format_date(date), "1/11/2020");
        let date = NaiveDate::from_ymd_opt(2021, 2, 28).unwrap();
        assert_eq!(format_date(date), "28/02/2021");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("invoice number"), "Invoice Number");
        assert_eq!(title_case("bill to:"), "Bill To:");
        assert_eq!(title_case("VAT number"), "VAT Number");
        assert_eq!(title_case("termin płatności"), "Termin Płatności");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_keeps_rest_of_word() {
        assert_eq!(title_case("mcDonald"), "McDonald");
        assert_eq!(title_case("x2y z"), "X2y Z");
    }
}
