//! Reference orientation data for solar-system bodies.
//!
//! Obliquities are the published angles between each body's spin axis and
//! its orbital normal. Orbital planes are J2000 ecliptic values. Earth's
//! plane defines the ecliptic, so it is stored as exactly zero, as is the
//! Sun's own "orbit".

use std::collections::BTreeMap;

use crate::types::{BodyRecord, CelestialBodyOrientationConfig, LegacyObliquityConfig, OrbitalElements};

/// One catalogued body, in degrees and days.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatalogueBody {
    pub id: &'static str,
    pub obliquity_degrees: f64,
    pub inclination_degrees: f64,
    pub ascending_node_degrees: f64,
    /// Sidereal rotation period; positive regardless of sense.
    pub sidereal_rotation_days: f64,
}

impl CatalogueBody {
    pub fn orbital_elements(&self) -> OrbitalElements {
        OrbitalElements::from_degrees(self.inclination_degrees, self.ascending_node_degrees)
    }

    /// Legacy record with no explicit rotation sense.
    pub fn legacy_config(&self) -> LegacyObliquityConfig {
        LegacyObliquityConfig::new(self.obliquity_degrees)
    }

    pub fn record(&self) -> BodyRecord {
        BodyRecord {
            orientation: Some(CelestialBodyOrientationConfig::Legacy(self.legacy_config())),
            orbital_elements: Some(self.orbital_elements()),
        }
    }
}

const SOLAR_SYSTEM: &[CatalogueBody] = &[
    CatalogueBody {
        id: "sun",
        obliquity_degrees: 7.25,
        inclination_degrees: 0.0,
        ascending_node_degrees: 0.0,
        sidereal_rotation_days: 25.38,
    },
    CatalogueBody {
        id: "mercury",
        obliquity_degrees: 0.034,
        inclination_degrees: 7.005,
        ascending_node_degrees: 48.331,
        sidereal_rotation_days: 58.646,
    },
    CatalogueBody {
        id: "venus",
        obliquity_degrees: 177.36,
        inclination_degrees: 3.395,
        ascending_node_degrees: 76.680,
        sidereal_rotation_days: 243.025,
    },
    CatalogueBody {
        id: "earth",
        obliquity_degrees: 23.44,
        inclination_degrees: 0.0,
        ascending_node_degrees: 0.0,
        sidereal_rotation_days: 0.99727,
    },
    CatalogueBody {
        id: "moon",
        obliquity_degrees: 6.68,
        inclination_degrees: 5.145,
        ascending_node_degrees: 125.08,
        sidereal_rotation_days: 27.3217,
    },
    CatalogueBody {
        id: "mars",
        obliquity_degrees: 25.19,
        inclination_degrees: 1.850,
        ascending_node_degrees: 49.558,
        sidereal_rotation_days: 1.02596,
    },
    CatalogueBody {
        id: "jupiter",
        obliquity_degrees: 3.13,
        inclination_degrees: 1.303,
        ascending_node_degrees: 100.464,
        sidereal_rotation_days: 0.41354,
    },
    CatalogueBody {
        id: "saturn",
        obliquity_degrees: 26.73,
        inclination_degrees: 2.485,
        ascending_node_degrees: 113.665,
        sidereal_rotation_days: 0.44401,
    },
    CatalogueBody {
        id: "uranus",
        obliquity_degrees: 97.77,
        inclination_degrees: 0.773,
        ascending_node_degrees: 74.006,
        sidereal_rotation_days: 0.71833,
    },
    CatalogueBody {
        id: "neptune",
        obliquity_degrees: 28.32,
        inclination_degrees: 1.770,
        ascending_node_degrees: 131.784,
        sidereal_rotation_days: 0.67125,
    },
    CatalogueBody {
        id: "pluto",
        obliquity_degrees: 122.53,
        inclination_degrees: 17.16,
        ascending_node_degrees: 110.299,
        sidereal_rotation_days: 6.3872,
    },
];

/// All catalogued bodies, Sun first, then by distance.
pub fn solar_system() -> &'static [CatalogueBody] {
    SOLAR_SYSTEM
}

/// The catalogue as legacy body records keyed by id.
pub fn solar_system_records() -> BTreeMap<String, BodyRecord> {
    SOLAR_SYSTEM
        .iter()
        .map(|body| (body.id.to_string(), body.record()))
        .collect()
}
