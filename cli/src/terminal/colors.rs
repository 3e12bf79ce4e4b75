use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IPV4_ADDR: Color = Color::TrueColor {
    r: 102,
    g: 204,
    b: 255,
};
pub const PORT_OPEN: Color = Color::Green;
pub const OWNER: Color = Color::Cyan;
