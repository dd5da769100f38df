use crate::math::Color;
use crate::random::RandomSource;

/// A palette entry: CSS colour name and its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Color,
}

const fn named(name: &'static str, r: u8, g: u8, b: u8) -> NamedColor {
    NamedColor {
        name,
        color: Color::from_rgb8(r, g, b),
    }
}

/// Fixed, ordered set of colours handed out to meshes
pub const PALETTE: [NamedColor; 8] = [
    named("dodgerblue", 0x1e, 0x90, 0xff),
    named("tomato", 0xff, 0x63, 0x47),
    named("limegreen", 0x32, 0xcd, 0x32),
    named("rebeccapurple", 0x66, 0x33, 0x99),
    named("gold", 0xff, 0xd7, 0x00),
    named("lavender", 0xe6, 0xe6, 0xfa),
    named("lightcoral", 0xf0, 0x80, 0x80),
    named("papayawhip", 0xff, 0xef, 0xd5),
];

/// Draw one palette entry uniformly at random
pub fn pick_named<R: RandomSource + ?Sized>(rng: &mut R) -> NamedColor {
    PALETTE[rng.index(PALETTE.len())]
}

/// Draw one palette colour uniformly at random
pub fn pick_color<R: RandomSource + ?Sized>(rng: &mut R) -> Color {
    pick_named(rng).color
}

pub fn contains(color: Color) -> bool {
    PALETTE.iter().any(|entry| entry.color == color)
}

pub fn lookup(name: &str) -> Option<Color> {
    PALETTE
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
        .map(|entry| entry.color)
}
