use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{Isotope, IsotopeKey};

/// Default minimum-abundance threshold carried by collections.
pub const DEFAULT_YMIN: f64 = 1e-10;

/// Coordinate extent of a collection in the (N, Z) plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_n: u32,
    pub max_n: u32,
    pub min_z: u32,
    pub max_z: u32,
}

impl Bounds {
    /// Bounds widened by half a cell on every side, for chart axes where
    /// each nuclide occupies a unit cell centered on its coordinates.
    pub fn padded(&self) -> (f64, f64, f64, f64) {
        (
            self.min_n as f64 - 0.5,
            self.max_n as f64 + 0.5,
            self.min_z as f64 - 0.5,
            self.max_z as f64 + 0.5,
        )
    }
}

/// An unordered set of isotopes keyed by the `1000*Z + N` checksum.
///
/// Storage order is whatever the last sort established; the checksum
/// index keeps lookups O(1) regardless. The `ymin` threshold is carried
/// for ingestion policy; the collection itself never filters on it.
#[derive(Debug, Clone)]
pub struct IsotopeCollection {
    ymin: f64,
    isotopes: Vec<Isotope>,
    index: HashMap<u32, usize>,
}

impl Default for IsotopeCollection {
    fn default() -> Self {
        Self::with_ymin(DEFAULT_YMIN)
    }
}

impl IsotopeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ymin(ymin: f64) -> Self {
        Self {
            ymin,
            isotopes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Minimum-abundance threshold this collection was built with.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.isotopes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.isotopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Isotope> {
        self.isotopes.iter()
    }

    /// Creates and stores an isotope; the checksum must not be present.
    pub fn insert(&mut self, key: &IsotopeKey, y: f64) -> Result<&Isotope> {
        let iso = Isotope::new(key, y)?;
        let slot = self.insert_isotope(iso)?;
        Ok(&self.isotopes[slot])
    }

    /// Stores an already-built isotope, erroring on a checksum collision.
    pub(crate) fn insert_isotope(&mut self, iso: Isotope) -> Result<usize> {
        let chk = iso.checksum();
        if self.index.contains_key(&chk) {
            return Err(Error::DuplicateIsotope(iso.name()));
        }
        let slot = self.isotopes.len();
        self.isotopes.push(iso);
        self.index.insert(chk, slot);
        Ok(slot)
    }

    /// Resolves a key to its checksum. Name and coordinate keys go
    /// through full isotope construction, so malformed names and
    /// coordinates that cannot be encoded (a neutron count over 999
    /// would alias another nuclide's checksum) fail with the
    /// construction error rather than a miss.
    pub(crate) fn resolve(key: &IsotopeKey) -> Result<u32> {
        match key {
            IsotopeKey::Name(name) => Ok(Isotope::from_name(name, f64::NAN)?.checksum()),
            IsotopeKey::Coords { z, n } => Ok(Isotope::from_coords(*z, *n, f64::NAN)?.checksum()),
            IsotopeKey::Checksum(chk) => Ok(*chk),
        }
    }

    /// Looks up a stored isotope.
    pub fn get(&self, key: &IsotopeKey) -> Result<&Isotope> {
        let chk = Self::resolve(key)?;
        self.by_checksum(chk)
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    /// Looks up a stored isotope for mutation (abundance only; identity
    /// is immutable).
    pub fn get_mut(&mut self, key: &IsotopeKey) -> Result<&mut Isotope> {
        let chk = Self::resolve(key)?;
        match self.index.get(&chk) {
            Some(&slot) => Ok(&mut self.isotopes[slot]),
            None => Err(Error::NotFound(key.to_string())),
        }
    }

    pub fn contains(&self, key: &IsotopeKey) -> bool {
        Self::resolve(key)
            .map(|chk| self.index.contains_key(&chk))
            .unwrap_or(false)
    }

    pub(crate) fn by_checksum(&self, chk: u32) -> Option<&Isotope> {
        self.index.get(&chk).map(|&slot| &self.isotopes[slot])
    }

    pub(crate) fn contains_checksum(&self, chk: u32) -> bool {
        self.index.contains_key(&chk)
    }

    /// Reorders storage ascending by abundance, NaN last.
    pub fn sort_by_abundance(&mut self) {
        self.isotopes.sort_by(|a, b| nan_last(a.y(), b.y()));
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .isotopes
            .iter()
            .enumerate()
            .map(|(slot, iso)| (iso.checksum(), slot))
            .collect();
    }

    /// Largest abundance over all isotopes. NaN entries are ignored; the
    /// result is NaN only when every abundance is unknown.
    pub fn max_abundance(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptyCollection("max_abundance"));
        }
        Ok(self.isotopes.iter().map(Isotope::y).fold(f64::NAN, f64::max))
    }

    /// Coordinate extent over all stored isotopes.
    pub fn bounds(&self) -> Result<Bounds> {
        if self.is_empty() {
            return Err(Error::EmptyCollection("bounds"));
        }
        let mut bounds = Bounds {
            min_n: u32::MAX,
            max_n: 0,
            min_z: u32::MAX,
            max_z: 0,
        };
        for iso in &self.isotopes {
            bounds.min_n = bounds.min_n.min(iso.n());
            bounds.max_n = bounds.max_n.max(iso.n());
            bounds.min_z = bounds.min_z.min(iso.z());
            bounds.max_z = bounds.max_z.max(iso.z());
        }
        Ok(bounds)
    }

    /// Combines two collections: checksum union, and where a nuclide is
    /// in both, the higher abundance wins. The result is sorted by
    /// abundance and carries the smaller `ymin`.
    pub fn merge(&self, other: &Self) -> Self {
        let mut out = Self::with_ymin(self.ymin.min(other.ymin));
        for iso in &self.isotopes {
            let y = match other.by_checksum(iso.checksum()) {
                Some(theirs) => pick_higher(iso.y(), theirs.y()),
                None => iso.y(),
            };
            let mut merged = iso.clone();
            merged.set_y(y);
            // unique within self, so this cannot collide
            let _ = out.insert_isotope(merged);
        }
        for iso in &other.isotopes {
            if !out.contains_checksum(iso.checksum()) {
                let _ = out.insert_isotope(iso.clone());
            }
        }
        out.sort_by_abundance();
        out
    }
}

/// Max of two abundances where NaN means "unknown" and loses to any
/// known value.
pub(crate) fn pick_higher(a: f64, b: f64) -> f64 {
    a.max(b)
}

/// Ascending float comparison with NaN ordered after every number.
pub(crate) fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
