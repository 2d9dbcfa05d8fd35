//! Avatar badges for the chat list.
//!
//! Each chat gets a two-letter badge colored by hashing its caption, so the
//! same chat always shows the same color. The hash is the classic
//! `(hash << 5) - hash + code_unit` over UTF-16 code units with 32-bit
//! wrapping, mapped onto a fixed palette.

use ratatui::style::Color;

/// Palette for avatar badges.
const AVATAR_COLORS: [Color; 12] = [
    Color::Rgb(0xff, 0x76, 0x75),
    Color::Rgb(0x74, 0xb9, 0xff),
    Color::Rgb(0xa2, 0x9b, 0xfe),
    Color::Rgb(0x81, 0xec, 0xec),
    Color::Rgb(0xff, 0xea, 0xa7),
    Color::Rgb(0xfa, 0xb1, 0xa0),
    Color::Rgb(0xfd, 0x79, 0xa8),
    Color::Rgb(0x00, 0xb8, 0x94),
    Color::Rgb(0x6c, 0x5c, 0xe7),
    Color::Rgb(0xfd, 0xcb, 0x6e),
    Color::Rgb(0xe1, 0x70, 0x55),
    Color::Rgb(0x00, 0xce, 0xc9),
];

/// Badge color for a caption.
pub fn color(text: &str) -> Color {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    AVATAR_COLORS[hash.unsigned_abs() as usize % AVATAR_COLORS.len()]
}

/// Uppercase initials of the caption, at most two letters.
pub fn initials(caption: &str) -> String {
    caption
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
