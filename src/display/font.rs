//! 14-segment font for the HT16K33 alphanumeric backpack.
//!
//! Bit layout per glyph (segment letters as printed on the module):
//!
//! ```text
//!  bit  0 A    bit  4 E    bit  8 H    bit 12 M
//!  bit  1 B    bit  5 F    bit  9 J    bit 13 N
//!  bit  2 C    bit  6 G1   bit 10 K    bit 14 DP
//!  bit  3 D    bit  7 G2   bit 11 L
//! ```
//!
//! Indexed from `' '` (0x20); the final entry is DEL (0x7F), which
//! [`encode_char`] never selects.

/// All segments off.
pub const BLANK: u16 = 0x0000;

/// First code point in the table.
const FIRST: u32 = ' ' as u32;

#[rustfmt::skip]
pub const FONT_TABLE: [u16; 96] = [
    0b0000000000000000, // ' '
    0b0000000000000110, // !
    0b0000001000100000, // "
    0b0001001011001110, // #
    0b0001001011101101, // $
    0b0000110000100100, // %
    0b0010001101011101, // &
    0b0000010000000000, // '
    0b0010010000000000, // (
    0b0000100100000000, // )
    0b0011111111000000, // *
    0b0001001011000000, // +
    0b0000100000000000, // ,
    0b0000000011000000, // -
    0b0100000000000000, // .
    0b0000110000000000, // /
    0b0000110000111111, // 0
    0b0000000000000110, // 1
    0b0000000011011011, // 2
    0b0000000010001111, // 3
    0b0000000011100110, // 4
    0b0010000001101001, // 5
    0b0000000011111101, // 6
    0b0000000000000111, // 7
    0b0000000011111111, // 8
    0b0000000011101111, // 9
    0b0001001000000000, // :
    0b0000101000000000, // ;
    0b0010010000000000, // <
    0b0000000011001000, // =
    0b0000100100000000, // >
    0b0001000010000011, // ?
    0b0000001010111011, // @
    0b0000000011110111, // A
    0b0001001010001111, // B
    0b0000000000111001, // C
    0b0001001000001111, // D
    0b0000000011111001, // E
    0b0000000001110001, // F
    0b0000000010111101, // G
    0b0000000011110110, // H
    0b0001001000001001, // I
    0b0000000000011110, // J
    0b0000010101110000, // K
    0b0000000000111000, // L
    0b0000010000110110, // M
    0b0000000100110110, // N
    0b0000000000111111, // O
    0b0000000011110011, // P
    0b0000000011111111, // Q
    0b0000000011110011, // R
    0b0000000011101101, // S
    0b0001001000000001, // T
    0b0000000000111110, // U
    0b0000110000110000, // V
    0b0010100000110110, // W
    0b0010110100000000, // X
    0b0001010100000000, // Y
    0b0000110000001001, // Z
    0b0000000000111001, // [
    0b0000000000000000, // backslash
    0b0000000000001111, // ]
    0b0000110000000011, // ^
    0b0000000000001000, // _
    0b0000000100000000, // `
    0b0000000011011111, // a
    0b0010000001111000, // b
    0b0000000011011000, // c
    0b0000100010001110, // d
    0b0000100001011000, // e
    0b0000000001110001, // f
    0b0000010010001110, // g
    0b0001000001110000, // h
    0b0001000000000000, // i
    0b0000000000001110, // j
    0b0011011000000000, // k
    0b0000000000110000, // l
    0b0001000011010100, // m
    0b0001000001010000, // n
    0b0000000011011100, // o
    0b0000000011110011, // p
    0b0000000011100111, // q
    0b0000000001010000, // r
    0b0000000011101101, // s
    0b0000000001111000, // t
    0b0000000000011100, // u
    0b0010000000000100, // v
    0b0010100000010100, // w
    0b0010110100000000, // x
    0b0001010100000000, // y
    0b0000110000001001, // z
    0b0000100101001001, // {
    0b0001001000000000, // |
    0b0010010010001001, // }
    0b0000010100100000, // ~
    0b0011111111111111, // DEL
];

/// Glyph for one character. Anything outside `' '..='~'` is blank.
pub fn encode_char(c: char) -> u16 {
    if (' '..='~').contains(&c) {
        FONT_TABLE[(c as u32 - FIRST) as usize]
    } else {
        BLANK
    }
}
