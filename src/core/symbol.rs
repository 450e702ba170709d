//! Card face symbols
//!
//! Symbols are drawn from a fixed palette. Deck construction always takes
//! an order-stable prefix of the palette, so lower difficulty tiers reuse
//! the same leading symbols.

use std::fmt;

/// A card face symbol, identified by its icon name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(&'static str);

impl Symbol {
    pub const fn new(name: &'static str) -> Self {
        Symbol(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The full symbol palette (Font Awesome icon names)
///
/// Palette size bounds the maximum supportable pair count.
pub const SYMBOL_PALETTE: [Symbol; 35] = [
    Symbol::new("heart"),
    Symbol::new("star"),
    Symbol::new("bomb"),
    Symbol::new("cloud"),
    Symbol::new("face-smile"),
    Symbol::new("car"),
    Symbol::new("ghost"),
    Symbol::new("camera"),
    Symbol::new("fire"),
    Symbol::new("gear"),
    Symbol::new("lemon"),
    Symbol::new("droplet"),
    Symbol::new("flask"),
    Symbol::new("palette"),
    Symbol::new("bug"),
    Symbol::new("shirt"),
    Symbol::new("cross"),
    Symbol::new("hammer"),
    Symbol::new("rocket"),
    Symbol::new("square"),
    Symbol::new("fish"),
    Symbol::new("mug-hot"),
    Symbol::new("sun"),
    Symbol::new("music"),
    Symbol::new("leaf"),
    Symbol::new("moon"),
    Symbol::new("train"),
    Symbol::new("ship"),
    Symbol::new("lightbulb"),
    Symbol::new("tooth"),
    Symbol::new("spider"),
    Symbol::new("skull"),
    Symbol::new("shoe-prints"),
    Symbol::new("sailboat"),
    Symbol::new("poop"),
];
