use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Symbols printed on the slot reels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Symbol {
    Cherry = 0,
    Lemon = 1,
    Bell = 2,
    Watermelon = 3,
    Star = 4,
    Diamond = 5,
    Seven = 6,
}

impl Symbol {
    /// Every symbol on a reel, in reel order.
    pub const ALL: [Symbol; 7] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Bell,
        Symbol::Watermelon,
        Symbol::Star,
        Symbol::Diamond,
        Symbol::Seven,
    ];

    /// The only symbol whose triple pays the jackpot multiplier.
    pub const JACKPOT: Symbol = Symbol::Diamond;

    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Bell => "🔔",
            Symbol::Watermelon => "🍉",
            Symbol::Star => "⭐",
            Symbol::Diamond => "💎",
            Symbol::Seven => "7️⃣",
        }
    }

    pub fn is_jackpot(self) -> bool {
        self == Self::JACKPOT
    }
}

impl TryFrom<u8> for Symbol {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Error returned when a glyph is not on the reels.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol: {0}")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Seven is also written without the variation selector.
        if s == "7" || s == "7\u{20e3}" {
            return Ok(Symbol::Seven);
        }
        Self::ALL
            .into_iter()
            .find(|symbol| symbol.glyph() == s)
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.glyph())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let glyph = String::deserialize(deserializer)?;
        glyph.parse().map_err(serde::de::Error::custom)
    }
}

/// Renders a reel line the way it is written into history ("🍒 🍋 🍉").
pub fn reel_line(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(|symbol| symbol.glyph())
        .collect::<Vec<_>>()
        .join(" ")
}
