//! The fixed LEO altitude zone table.

/// Label used for altitudes outside every defined zone.
pub const OTHER_LABEL: &str = "OTHER";

/// Range description used for altitudes outside every defined zone.
pub const OTHER_RANGE: &str = "outside defined LEO zones";

/// One half-open altitude interval `[lower_km, upper_km)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBin {
    /// Zone label, e.g. `LEO-1`.
    pub label: &'static str,
    /// Inclusive lower bound, km.
    pub lower_km: f64,
    /// Exclusive upper bound, km.
    pub upper_km: f64,
    /// Human-readable interval, e.g. `300-500 km`.
    pub range: &'static str,
}

impl ZoneBin {
    /// Whether an altitude falls inside this bin.
    pub fn contains(&self, altitude_km: f64) -> bool {
        altitude_km >= self.lower_km && altitude_km < self.upper_km
    }
}

/// The four LEO zones, in report order.
pub const ZONE_BINS: [ZoneBin; 4] = [
    ZoneBin {
        label: "LEO-1",
        lower_km: 300.0,
        upper_km: 500.0,
        range: "300-500 km",
    },
    ZoneBin {
        label: "LEO-2",
        lower_km: 500.0,
        upper_km: 800.0,
        range: "500-800 km",
    },
    ZoneBin {
        label: "LEO-3",
        lower_km: 800.0,
        upper_km: 1200.0,
        range: "800-1200 km",
    },
    ZoneBin {
        label: "LEO-4",
        lower_km: 1200.0,
        upper_km: 2000.0,
        range: "1200-2000 km",
    },
];

/// Result of binning one altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneMatch {
    /// The altitude falls in a defined zone.
    Bin(&'static ZoneBin),
    /// The altitude falls outside all defined zones.
    Other,
}

impl ZoneMatch {
    /// Zone label, or [`OTHER_LABEL`].
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bin(bin) => bin.label,
            Self::Other => OTHER_LABEL,
        }
    }

    /// Zone range description, or [`OTHER_RANGE`].
    pub const fn range(self) -> &'static str {
        match self {
            Self::Bin(bin) => bin.range,
            Self::Other => OTHER_RANGE,
        }
    }
}

/// Find the zone holding an altitude.
pub fn zone_for_altitude(altitude_km: f64) -> ZoneMatch {
    ZONE_BINS
        .iter()
        .find(|bin| bin.contains(altitude_km))
        .map_or(ZoneMatch::Other, ZoneMatch::Bin)
}

/// Look up a zone's range description by label.
pub fn range_for_label(label: &str) -> Option<&'static str> {
    ZONE_BINS
        .iter()
        .find(|bin| bin.label == label)
        .map(|bin| bin.range)
}
