//! Glyph widths of the standard PDF fonts
//!
//! Widths are in 1/1000 em, taken from the Adobe Core14 AFM files. The
//! `*_WIDTHS` tables are indexed by WinAnsi code minus 0x20 (space through
//! tilde), the `*_HIGH_WIDTHS` tables by code minus 0x80. Codes WinAnsi
//! leaves undefined have width 0.

pub(crate) const FIRST_CHAR: u8 = 0x20;
pub(crate) const LAST_CHAR: u8 = 0x7E;
pub(crate) const HIGH_FIRST_CHAR: u8 = 0x80;

#[rustfmt::skip]
pub(crate) const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
pub(crate) const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[rustfmt::skip]
pub(crate) const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    556,   0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000,   0, 611,   0,
      0, 222, 222, 333, 333,  350, 556, 1000, 333, 1000, 500, 333,  944,   0, 500, 667,
    278, 333, 556, 556, 556,  556, 260, 556, 333,  737, 370, 556,  584, 333, 737, 333,
    400, 584, 333, 333, 333,  556, 537, 278, 333,  333, 365, 556,  834, 834, 834, 611,
    667, 667, 667, 667, 667,  667, 1000, 722, 667, 667, 667, 667,  278, 278, 278, 278,
    722, 722, 778, 778, 778,  778, 778, 584, 778,  722, 722, 722,  722, 667, 667, 611,
    556, 556, 556, 556, 556,  556, 889, 500, 556,  556, 556, 556,  278, 278, 278, 278,
    556, 556, 556, 556, 556,  556, 556, 584, 611,  556, 556, 556,  556, 500, 556, 500,
];

#[rustfmt::skip]
pub(crate) const TIMES_ROMAN_HIGH_WIDTHS: [u16; 128] = [
    500,   0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333,  889,   0, 611,   0,
      0, 333, 333, 444, 444,  350, 500, 1000, 333,  980, 389, 333,  722,   0, 444, 722,
    250, 333, 500, 500, 500,  500, 200, 500, 333,  760, 276, 500,  564, 333, 760, 333,
    400, 564, 300, 300, 333,  500, 453, 250, 333,  300, 310, 500,  750, 750, 750, 444,
    722, 722, 722, 722, 722,  722, 889, 667, 611,  611, 611, 611,  333, 333, 333, 333,
    722, 722, 722, 722, 722,  722, 722, 564, 722,  722, 722, 722,  722, 722, 556, 500,
    444, 444, 444, 444, 444,  444, 667, 444, 444,  444, 444, 444,  278, 278, 278, 278,
    500, 500, 500, 500, 500,  500, 500, 564, 500,  500, 500, 500,  500, 500, 500, 500,
];

/// Courier is monospaced
pub(crate) const COURIER_WIDTH: u16 = 600;
