//! Numeric building blocks for the SimProp propagation framework.
//!
//! Everything here is pure, synchronous, and bounded by a fixed node or
//! iteration count:
//!
//! - [`integrate`]: composite Simpson quadrature.
//! - [`find_root`] / [`try_find_root`] / [`try_bracket_root`]: bisection on
//!   a bracketed sign change.
//! - [`log_axis`]: log-spaced sample points.
//! - [`LookupTable`]: fixed-size log-uniform table with linear interpolation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod axis;
pub mod lookup;
pub mod root;
pub mod simpson;

pub use axis::log_axis;
pub use lookup::LookupTable;
pub use root::{find_root, try_bracket_root, try_find_root, Bracket};
pub use simpson::{integrate, simpson_weights};
