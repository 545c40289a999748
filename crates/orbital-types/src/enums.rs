//! Enumeration types for the orbital pressure engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Orbital regime an object is classified into.
///
/// Derived from mean motion and eccentricity on every snapshot build; never
/// stored per object. Serialized in upper case (`"LEO"`, `"MEO"`, ...) to
/// match the keys of the persisted `active_regimes` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "UPPERCASE")]
pub enum Regime {
    /// Low Earth Orbit: at least 11.25 revolutions per day.
    Leo,
    /// Medium Earth Orbit: between the GEO band and the LEO threshold.
    Meo,
    /// Geosynchronous Orbit: roughly one revolution per sidereal day.
    Geo,
    /// Anything the rules above do not claim (eccentric, decaying, or
    /// slower than geosynchronous).
    Unclassified,
}

impl Regime {
    /// The three regimes that are aggregated into snapshot counts.
    pub const COUNTED: [Self; 3] = [Self::Leo, Self::Meo, Self::Geo];

    /// Upper-case label used as the persisted key.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Leo => "LEO",
            Self::Meo => "MEO",
            Self::Geo => "GEO",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }
}

impl core::fmt::Display for Regime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
