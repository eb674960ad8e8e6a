//! Helvetica metrics and WinAnsi text encoding.

/// The two standard fonts used by the writer, with their resource names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
}

impl Font {
    pub(crate) fn resource_name(self) -> &'static [u8] {
        match self {
            Self::Regular => b"F1",
            Self::Bold => b"F2",
        }
    }

    pub(crate) fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    /// Width of `text` in points at `size`.
    pub(crate) fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(char_width).sum();
        let scale = match self {
            Self::Regular => 1.0,
            // Helvetica-Bold runs about 6% wider than the regular cut.
            Self::Bold => 1.06,
        };
        units as f32 * size * scale / 1000.0
    }

    /// Split `text` into lines no wider than `max_width`.
    ///
    /// Words are kept whole unless a single word alone overflows, in which
    /// case it is broken at the character that no longer fits.
    pub(crate) fn wrap(self, text: &str, size: f32, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split(' ') {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            if self.text_width(&candidate, size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for c in word.chars() {
                current.push(c);
                if self.text_width(&current, size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
        lines.push(current);
        lines
    }
}

/// Helvetica advance widths for printable ASCII, in 1/1000 em.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

fn char_width(c: char) -> u32 {
    let c = transliterate(c);
    match c as u32 {
        code @ 0x20..=0x7e => u32::from(ASCII_WIDTHS[(code - 0x20) as usize]),
        _ => 556,
    }
}

/// Map characters WinAnsi lacks to their closest plain form.
fn transliterate(c: char) -> char {
    match c {
        'ą' => 'a',
        'ć' => 'c',
        'ę' => 'e',
        'ł' => 'l',
        'ń' => 'n',
        'ś' => 's',
        'ź' | 'ż' => 'z',
        'Ą' => 'A',
        'Ć' => 'C',
        'Ę' => 'E',
        'Ł' => 'L',
        'Ń' => 'N',
        'Ś' => 'S',
        'Ź' | 'Ż' => 'Z',
        '\u{2013}' | '\u{2014}' => '-',
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201c}' | '\u{201d}' => '"',
        '\u{a0}' => ' ',
        other => other,
    }
}

/// Encode `text` as WinAnsi bytes for a literal PDF string.
///
/// Latin-1 printable characters map to themselves, a few common letters are
/// transliterated and everything else becomes `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match transliterate(c) {
            '€' => 0x80,
            c if matches!(c as u32, 0x20..=0x7e | 0xa0..=0xff) => c as u8,
            _ => b'?',
        })
        .collect()
}
