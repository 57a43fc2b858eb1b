//! Particle species identifiers.

use std::fmt;

/// Offset of the nuclear code block: `1000000000 + 10000·Z + 10·A`.
const NUCLEUS_BASE: i32 = 1_000_000_000;

/// Identifies a particle species.
///
/// Nuclei use the PDG nuclear code `10LZZZAAAI` with `L = I = 0`, so a
/// nucleus with charge `Z` and mass number `A` is `1000000000 + 10000·Z + 10·A`.
/// Anything at or below that block is a non-nuclear species and is never
/// propagated by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(pub i32);

impl Pid {
    /// Free proton (`Z = 1`, `A = 1`).
    pub const PROTON: Pid = Pid::nucleus(1, 1);
    /// Free neutron (`Z = 0`, `A = 1`).
    pub const NEUTRON: Pid = Pid::nucleus(0, 1);
    /// Electron.
    pub const ELECTRON: Pid = Pid(11);
    /// Photon.
    pub const PHOTON: Pid = Pid(22);

    /// Nuclear code for charge `z` and mass number `a`.
    pub const fn nucleus(z: i32, a: i32) -> Self {
        Self(NUCLEUS_BASE + 10_000 * z + 10 * a)
    }

    /// Whether this code denotes a nucleus (including free nucleons).
    pub const fn is_nucleus(self) -> bool {
        self.0 > NUCLEUS_BASE && self.mass_number() > 0
    }

    /// Whether this is a single nucleon (proton or neutron).
    pub const fn is_nucleon(self) -> bool {
        self.is_nucleus() && self.mass_number() == 1
    }

    /// Nuclear charge `Z`, or 0 for non-nuclei.
    pub const fn charge(self) -> i32 {
        if self.0 > NUCLEUS_BASE {
            ((self.0 - NUCLEUS_BASE) / 10_000) % 1000
        } else {
            0
        }
    }

    /// Mass number `A`, or 0 for non-nuclei.
    pub const fn mass_number(self) -> i32 {
        if self.0 > NUCLEUS_BASE {
            ((self.0 - NUCLEUS_BASE) / 10) % 1000
        } else {
            0
        }
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Pid {
    fn from(v: i32) -> Self {
        Self(v)
    }
}
