//! SI units and physical constants.
//!
//! Every quantity in SimProp is stored in SI base units. Multiply by a unit
//! to convert into SI, divide to convert out:
//!
//! ```
//! use simprop_core::units::{eV, GeV};
//! let e = 1e3 * eV;
//! assert!((e / GeV - 1e-6).abs() < 1e-18);
//! ```

#![allow(non_upper_case_globals)]

// ── Base units ──────────────────────────────────────────────────

/// Metre.
pub const meter: f64 = 1.0;
/// Second.
pub const second: f64 = 1.0;
/// Kilogram.
pub const kilogram: f64 = 1.0;
/// Kelvin.
pub const kelvin: f64 = 1.0;
/// Joule.
pub const joule: f64 = 1.0;

/// Centimetre.
pub const centimeter: f64 = 1e-2 * meter;
/// Kilometre.
pub const kilometer: f64 = 1e3 * meter;
/// Parsec.
pub const parsec: f64 = 3.085_677_581_491_367e16 * meter;
/// Megaparsec.
pub const megaparsec: f64 = 1e6 * parsec;
/// Millibarn.
pub const millibarn: f64 = 1e-31 * meter * meter;

// ── Energy ──────────────────────────────────────────────────────

/// Electronvolt.
pub const eV: f64 = 1.602_176_634e-19 * joule;
/// Kiloelectronvolt.
pub const keV: f64 = 1e3 * eV;
/// Megaelectronvolt.
pub const MeV: f64 = 1e6 * eV;
/// Gigaelectronvolt.
pub const GeV: f64 = 1e9 * eV;

// ── Constants ───────────────────────────────────────────────────

/// Speed of light in vacuum.
pub const C_LIGHT: f64 = 2.997_924_58e8 * meter / second;
/// Reduced Planck constant.
pub const H_BAR: f64 = 1.054_571_817e-34 * joule * second;
/// `ħc`, used by the blackbody photon density.
pub const H_BAR_C: f64 = H_BAR * C_LIGHT;
/// Boltzmann constant.
pub const K_BOLTZMANN: f64 = 1.380_649e-23 * joule / kelvin;
/// Fine-structure constant.
pub const ALPHA: f64 = 1.0 / 137.035_999_084;
/// Classical electron radius.
pub const ELECTRON_RADIUS: f64 = 2.817_940_326_2e-15 * meter;
/// Electron rest mass.
pub const ELECTRON_MASS: f64 = 9.109_383_701_5e-31 * kilogram;
/// Proton rest mass.
pub const PROTON_MASS: f64 = 1.672_621_923_69e-27 * kilogram;
/// Electron rest energy `mₑc²`.
pub const ELECTRON_MASS_C2: f64 = ELECTRON_MASS * C_LIGHT * C_LIGHT;
/// Proton rest energy `m_p c²`.
pub const PROTON_MASS_C2: f64 = PROTON_MASS * C_LIGHT * C_LIGHT;
/// Neutral pion rest energy.
pub const PION_MASS_C2: f64 = 134.976_8 * MeV;
