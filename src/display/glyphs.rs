//! Custom 5x8 LCD characters.
//!
//! HD44780-compatible controllers hold eight user glyphs in CGRAM. Each row
//! is one byte; only the low five bits are lit.

/// A single 5x8 character bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub name: &'static str,
    pub rows: [u8; 8],
}

/// CGRAM slot each glyph is registered in at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GlyphSlot {
    CoffeeHeart = 0,
    CoffeeArmed = 1,
    CoffeeDisarmed = 2,
    Bean = 3,
    Restart = 4,
    Return = 5,
    Clock = 6,
    Calendar = 7,
}

impl GlyphSlot {
    pub const fn index(self) -> u8 {
        self as u8
    }
}

pub const COFFEE_HEART: Glyph = Glyph {
    name: "coffee-heart",
    rows: [
        0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b01111, 0b01111, 0b01110,
    ],
};

pub const COFFEE_ARMED: Glyph = Glyph {
    name: "coffee-armed",
    rows: [
        0b00001, 0b01010, 0b00100, 0b00000, 0b00000, 0b01111, 0b01111, 0b01110,
    ],
};

pub const COFFEE_DISARMED: Glyph = Glyph {
    name: "coffee-disarmed",
    rows: [
        0b00000, 0b01010, 0b00100, 0b01010, 0b00000, 0b01111, 0b01111, 0b01110,
    ],
};

pub const BEAN: Glyph = Glyph {
    name: "bean",
    rows: [
        0b01100, 0b11110, 0b10111, 0b11011, 0b11011, 0b11101, 0b01111, 0b00110,
    ],
};

pub const RESTART: Glyph = Glyph {
    name: "restart",
    rows: [
        0b00000, 0b11100, 0b01100, 0b10101, 0b10001, 0b10001, 0b01110, 0b00000,
    ],
};

pub const RETURN: Glyph = Glyph {
    name: "return",
    rows: [
        0b00000, 0b00001, 0b00001, 0b00101, 0b01101, 0b11111, 0b01100, 0b00100,
    ],
};

pub const CLOCK: Glyph = Glyph {
    name: "clock",
    rows: [
        0b00000, 0b01110, 0b10101, 0b10111, 0b10001, 0b01110, 0b00000, 0b00000,
    ],
};

pub const CALENDAR: Glyph = Glyph {
    name: "calendar",
    rows: [
        0b00000, 0b01010, 0b11111, 0b11111, 0b10001, 0b10001, 0b11111, 0b00000,
    ],
};

/// Every glyph, indexed by its [`GlyphSlot`].
pub const GLYPH_TABLE: [(GlyphSlot, Glyph); 8] = [
    (GlyphSlot::CoffeeHeart, COFFEE_HEART),
    (GlyphSlot::CoffeeArmed, COFFEE_ARMED),
    (GlyphSlot::CoffeeDisarmed, COFFEE_DISARMED),
    (GlyphSlot::Bean, BEAN),
    (GlyphSlot::Restart, RESTART),
    (GlyphSlot::Return, RETURN),
    (GlyphSlot::Clock, CLOCK),
    (GlyphSlot::Calendar, CALENDAR),
];
