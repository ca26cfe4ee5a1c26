//! Font handling for PDF documents

use crate::metrics::{
    COURIER_WIDTH, FIRST_CHAR, HELVETICA_HIGH_WIDTHS, HELVETICA_WIDTHS, HIGH_FIRST_CHAR,
    LAST_CHAR, TIMES_ROMAN_HIGH_WIDTHS, TIMES_ROMAN_WIDTHS,
};
use crate::truetype::TrueTypeFont;
use lopdf::Dictionary;

/// Handle to a font registered with a [`crate::PdfDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontHandle(pub(crate) usize);

/// Standard PDF fonts that every viewer provides without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    TimesRoman,
    Courier,
}

impl StandardFont {
    /// PostScript name used for `/BaseFont`
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::Courier => "Courier",
        }
    }

    /// Advance width of a WinAnsi code in 1/1000 em
    fn code_width(&self, code: u8) -> u16 {
        let (low, high) = match self {
            StandardFont::Courier => return COURIER_WIDTH,
            StandardFont::Helvetica => (&HELVETICA_WIDTHS, &HELVETICA_HIGH_WIDTHS),
            StandardFont::TimesRoman => (&TIMES_ROMAN_WIDTHS, &TIMES_ROMAN_HIGH_WIDTHS),
        };

        match code {
            FIRST_CHAR..=LAST_CHAR => low[(code - FIRST_CHAR) as usize],
            HIGH_FIRST_CHAR..=u8::MAX => high[(code - HIGH_FIRST_CHAR) as usize],
            _ => 0,
        }
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let width: u32 = text
            .chars()
            .map(|c| self.code_width(winansi_code(c)) as u32)
            .sum();
        width as f32 * font_size / 1000.0
    }

    /// Encode text as a hex string in WinAnsiEncoding
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() * 2 + 2);
        result.push('<');
        for c in text.chars() {
            result.push_str(&format!("{:02X}", winansi_code(c)));
        }
        result.push('>');
        result
    }

    /// Simple Type1 font dictionary
    pub fn to_pdf_dict(&self) -> Dictionary {
        Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type1".into()),
            ("BaseFont", self.base_font().into()),
            ("Encoding", "WinAnsiEncoding".into()),
        ])
    }
}

/// Map a character to its WinAnsi code
///
/// Printable ASCII and the Latin-1 upper half map onto themselves, the
/// punctuation and letters WinAnsi adds at 0x80-0x9F map onto their slots.
/// Anything else is drawn as `?`.
fn winansi_code(c: char) -> u8 {
    match c as u32 {
        code @ 0x20..=0x7E => code as u8,
        code @ 0xA0..=0xFF => code as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => b'?',
    }
}

/// A font an overlay can draw with
#[derive(Debug, Clone)]
pub enum PdfFont {
    Standard(StandardFont),
    TrueType(TrueTypeFont),
}

impl PdfFont {
    /// Display name of the font
    pub fn name(&self) -> &str {
        match self {
            PdfFont::Standard(font) => font.base_font(),
            PdfFont::TrueType(font) => font.name(),
        }
    }

    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        match self {
            PdfFont::Standard(font) => font.text_width_points(text, font_size),
            PdfFont::TrueType(font) => font.text_width_points(text, font_size),
        }
    }

    /// Encode text for the Tj operator
    ///
    /// Embedded fonts also record the glyphs drawn, which is why this
    /// takes `&mut self`.
    pub fn encode_text_hex(&mut self, text: &str) -> String {
        match self {
            PdfFont::Standard(font) => font.encode_text_hex(text),
            PdfFont::TrueType(font) => font.encode_text_hex(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_font_names() {
        assert_eq!(StandardFont::Helvetica.base_font(), "Helvetica");
        assert_eq!(StandardFont::TimesRoman.base_font(), "Times-Roman");
        assert_eq!(StandardFont::Courier.base_font(), "Courier");
    }

    #[test]
    fn test_standard_text_width() {
        // H=722 e=556 l=222 l=222 o=556 -> 2278
        let width = StandardFont::Helvetica.text_width_points("Hello", 10.0);
        assert!((width - 22.78).abs() < 1e-4);

        let width = StandardFont::Courier.text_width_points("abc", 10.0);
        assert!((width - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_standard_encode_winansi() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.encode_text_hex("Ab 1"), "<41622031>");
        assert_eq!(font.encode_text_hex("é"), "<E9>");
        // Outside Latin-1 falls back to '?'
        assert_eq!(font.encode_text_hex("ल"), "<3F>");
        assert_eq!(font.encode_text_hex(""), "<>");
    }

    #[test]
    fn test_standard_encode_winansi_punctuation() {
        let font = StandardFont::Helvetica;
        assert_eq!(
            font.encode_text_hex("O’Brien – €5"),
            "<4F92427269656E2096208035>"
        );
        assert_eq!(font.encode_text_hex("“…”—•"), "<9385949795>");
        assert_eq!(font.encode_text_hex("ŠŽšžŸ"), "<8A8E9A9E9F>");
    }

    #[test]
    fn test_standard_width_of_high_codes() {
        // Euro 556 + endash 556 + emdash 1000
        let width = StandardFont::Helvetica.text_width_points("€–—", 10.0);
        assert!((width - 21.12).abs() < 1e-4);

        // quoteright 333 + eacute 444
        let width = StandardFont::TimesRoman.text_width_points("’é", 10.0);
        assert!((width - 7.77).abs() < 1e-4);

        // Not in WinAnsi: measured as '?'
        let question = StandardFont::Helvetica.text_width_points("?", 10.0);
        let width = StandardFont::Helvetica.text_width_points("ल", 10.0);
        assert!((width - question).abs() < 1e-4);
    }

    #[test]
    fn test_standard_font_dict() {
        let dict = StandardFont::TimesRoman.to_pdf_dict();
        assert_eq!(dict.get(b"BaseFont").unwrap().as_name().unwrap(), b"Times-Roman");
        assert_eq!(
            dict.get(b"Encoding").unwrap().as_name().unwrap(),
            b"WinAnsiEncoding"
        );
    }

    #[test]
    fn test_pdf_font_dispatches_to_standard() {
        let mut font = PdfFont::Standard(StandardFont::Courier);

        assert_eq!(font.name(), "Courier");
        assert_eq!(font.encode_text_hex("abc"), "<616263>");
        assert!((font.text_width_points("abc", 10.0) - 18.0).abs() < 1e-4);
    }
}
