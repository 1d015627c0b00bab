//! Compile-time element symbol table.
//!
//! Maps atomic numbers to lowercase element symbols and back. Entry 0 is
//! the free neutron, so that every nuclide a reaction network can produce
//! has a symbol. The table is immutable and baked into the binary; there
//! is no load step and no process-wide mutable state.

/// Lowercase element symbols indexed by atomic number, H through Og.
/// Index 0 is the free neutron.
const SYMBOLS: [&str; 119] = [
    "n", "h", "he", "li", "be", "b", "c", "n", "o", "f", "ne", // 0-10
    "na", "mg", "al", "si", "p", "s", "cl", "ar", "k", "ca", // 11-20
    "sc", "ti", "v", "cr", "mn", "fe", "co", "ni", "cu", "zn", // 21-30
    "ga", "ge", "as", "se", "br", "kr", "rb", "sr", "y", "zr", // 31-40
    "nb", "mo", "tc", "ru", "rh", "pd", "ag", "cd", "in", "sn", // 41-50
    "sb", "te", "i", "xe", "cs", "ba", "la", "ce", "pr", "nd", // 51-60
    "pm", "sm", "eu", "gd", "tb", "dy", "ho", "er", "tm", "yb", // 61-70
    "lu", "hf", "ta", "w", "re", "os", "ir", "pt", "au", "hg", // 71-80
    "tl", "pb", "bi", "po", "at", "rn", "fr", "ra", "ac", "th", // 81-90
    "pa", "u", "np", "pu", "am", "cm", "bk", "cf", "es", "fm", // 91-100
    "md", "no", "lr", "rf", "db", "sg", "bh", "hs", "mt", "ds", // 101-110
    "rg", "cn", "nh", "fl", "mc", "lv", "ts", "og", // 111-118
];

/// Returns the lowercase symbol for an atomic number, or `None` if the
/// number is outside the table.
pub fn symbol(z: u32) -> Option<&'static str> {
    SYMBOLS.get(z as usize).copied()
}

/// Returns the atomic number for an element symbol, matched
/// case-insensitively, or `None` for an unknown symbol.
///
/// `"n"` resolves to nitrogen (Z = 7), not the free neutron; the bare
/// neutron is reached through the `neutron` isotope name alias instead.
pub fn atomic_number(symbol: &str) -> Option<u32> {
    let symbol = symbol.to_lowercase();
    SYMBOLS
        .iter()
        .skip(1)
        .position(|s| *s == symbol)
        .map(|i| i as u32 + 1)
}

/// Capitalizes a lowercase element symbol for display (`fe` -> `Fe`).
pub fn capitalize(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
