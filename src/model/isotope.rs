use std::fmt;

use crate::error::{Error, Result};
use crate::model::element;

/// Largest neutron count representable in the `1000*Z + N` checksum.
const MAX_N: u32 = 999;

/// Key identifying one nuclide for construction and lookup.
///
/// Exactly one representation is given, checked by the compiler; there is
/// no ambiguous multi-argument path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IsotopeKey {
    /// A name such as `"fe56"`, `"He4"`, or an alias (`"p"`, `"d"`,
    /// `"t"`, `"n"`, `"neutrons"`).
    Name(String),
    /// Proton and neutron counts.
    Coords { z: u32, n: u32 },
    /// The `1000*Z + N` encoding.
    Checksum(u32),
}

impl IsotopeKey {
    /// Shorthand for a name key.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl fmt::Display for IsotopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Coords { z, n } => write!(f, "Z={z} N={n}"),
            Self::Checksum(chk) => write!(f, "checksum {chk}"),
        }
    }
}

impl From<&str> for IsotopeKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// One nuclide: identity (Z, N) plus a scalar abundance.
///
/// Identity is immutable after construction; the abundance is not. Two
/// isotopes are the same nuclide iff their checksums are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Isotope {
    z: u32,
    n: u32,
    y: f64,
}

impl Isotope {
    /// Builds an isotope from any key form, with abundance `y`
    /// (`f64::NAN` for "unknown").
    pub fn new(key: &IsotopeKey, y: f64) -> Result<Self> {
        match key {
            IsotopeKey::Name(name) => Self::from_name(name, y),
            IsotopeKey::Coords { z, n } => Self::from_coords(*z, *n, y),
            IsotopeKey::Checksum(chk) => Self::from_checksum(*chk, y),
        }
    }

    /// Builds an isotope from proton and neutron counts.
    pub fn from_coords(z: u32, n: u32, y: f64) -> Result<Self> {
        if n > MAX_N {
            return Err(Error::InvalidArgument(format!(
                "neutron count {n} exceeds checksum encoding limit {MAX_N}"
            )));
        }
        if element::symbol(z).is_none() {
            return Err(Error::UnknownAtomicNumber(z));
        }
        Ok(Self { z, n, y })
    }

    /// Builds an isotope from the `1000*Z + N` checksum.
    pub fn from_checksum(checksum: u32, y: f64) -> Result<Self> {
        Self::from_coords(checksum / 1000, checksum % 1000, y)
    }

    /// Builds an isotope from a name such as `"fe56"`.
    ///
    /// The name is lowercased, alias forms are resolved, and the string is
    /// split into an alphabetic element part (one or two letters) and a
    /// numeric mass part.
    pub fn from_name(name: &str, y: f64) -> Result<Self> {
        let lowered = name.to_lowercase();
        let resolved = resolve_alias(&lowered);
        if resolved == "neutron" {
            return Ok(Self { z: 0, n: 1, y });
        }

        let symbol: String = resolved.chars().filter(|c| c.is_alphabetic()).collect();
        let digits: String = resolved.chars().filter(|c| c.is_ascii_digit()).collect();

        if symbol.is_empty() || symbol.len() > 2 {
            return Err(Error::ParseName {
                name: name.to_string(),
                details: "element part must be one or two letters".to_string(),
            });
        }
        let a: u32 = digits.parse().map_err(|_| Error::ParseName {
            name: name.to_string(),
            details: "missing or invalid mass number".to_string(),
        })?;

        let z = element::atomic_number(&symbol).ok_or(Error::UnknownElement(symbol))?;
        if a < z {
            return Err(Error::ParseName {
                name: name.to_string(),
                details: format!("mass number {a} is smaller than proton number {z}"),
            });
        }

        Self::from_coords(z, a - z, y)
    }

    /// Proton count.
    #[inline]
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Neutron count.
    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Mass number `Z + N`.
    #[inline]
    pub fn a(&self) -> u32 {
        self.z + self.n
    }

    /// Abundance; NaN when unknown.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Overwrites the abundance.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// The unique `1000*Z + N` identity key.
    #[inline]
    pub fn checksum(&self) -> u32 {
        self.z * 1000 + self.n
    }

    /// Canonical lowercase name, e.g. `"fe56"`; the free neutron is
    /// `"neutron"`.
    pub fn name(&self) -> String {
        nuclide_name(self.checksum())
    }

    /// Capitalized display name, e.g. `"Fe56"`.
    pub fn display_name(&self) -> String {
        element::capitalize(&self.name())
    }
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Canonical lowercase name for a checksum, without constructing an
/// isotope. Falls back to a `z?n?` spelling for atomic numbers outside
/// the element table (unreachable for checksums produced by this crate).
pub fn nuclide_name(checksum: u32) -> String {
    let z = checksum / 1000;
    let n = checksum % 1000;
    if z == 0 {
        return "neutron".to_string();
    }
    match element::symbol(z) {
        Some(sym) => format!("{sym}{}", z + n),
        None => format!("z{z}n{n}"),
    }
}

/// Alias forms accepted on name input.
fn resolve_alias(name: &str) -> &str {
    match name {
        "p" => "h1",
        "n" | "neutrons" => "neutron",
        "d" => "h2",
        "t" => "h3",
        other => other,
    }
}
