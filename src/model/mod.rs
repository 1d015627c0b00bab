pub mod element;
pub mod isotope;

pub use isotope::{nuclide_name, Isotope, IsotopeKey};
