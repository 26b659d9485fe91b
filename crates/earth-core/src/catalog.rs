//! The fixed set of Earth-system nodes and their declared connections.

use crate::model::{MissionInfo, Position, StaticImpact, SystemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// A node of the interaction graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EarthSystem {
    /// Unique, stable key.
    pub id: SystemId,
    /// Display name, e.g. "Water Resources".
    pub name: String,
    /// Display glyph, opaque to the engine.
    pub icon: String,
    /// Canvas position; only used for edge geometry.
    #[serde(default)]
    pub position: Option<Position>,
    pub description: String,
    /// Static headline figures, in display order.
    #[serde(default)]
    pub impacts: Vec<StaticImpact>,
    /// Outgoing connections in declaration order. Not required to be
    /// reciprocal, and ids may be absent from the catalog.
    #[serde(default)]
    pub connections: Vec<SystemId>,
    #[serde(default)]
    pub mission: Option<MissionInfo>,
    /// Derived by the interaction graph; input files cannot set it.
    #[serde(default, skip_deserializing)]
    pub(crate) highlighted: bool,
}

impl EarthSystem {
    /// Whether this system is a target of the current selection.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Errors raised while loading a catalog from an external description.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two systems share an id.
    #[error("duplicate system id: {0}")]
    DuplicateId(SystemId),
    /// A system has an empty id.
    #[error("system id must not be blank")]
    BlankId,
    /// A system has an empty display name.
    #[error("system {0} has a blank name")]
    BlankName(SystemId),
    /// Catalog file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Catalog text is not valid YAML of the expected shape.
    #[error("invalid yaml catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Catalog text is not valid JSON of the expected shape.
    #[error("invalid json catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct CatalogFile {
    systems: Vec<EarthSystem>,
}

/// Arena of Earth systems in catalog order.
///
/// Systems are never added or removed after construction; the only mutable
/// state is the `highlighted` flag, which is owned by
/// [`crate::graph::InteractionGraph`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct Catalog {
    systems: Vec<EarthSystem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate or blank ids and blank names.
    pub fn new(mut systems: Vec<EarthSystem>) -> Result<Self, CatalogError> {
        let mut seen: BTreeSet<&SystemId> = BTreeSet::new();
        for s in &systems {
            if s.id.0.trim().is_empty() {
                return Err(CatalogError::BlankId);
            }
            if s.name.trim().is_empty() {
                return Err(CatalogError::BlankName(s.id.clone()));
            }
            if !seen.insert(&s.id) {
                return Err(CatalogError::DuplicateId(s.id.clone()));
            }
        }
        for s in &mut systems {
            s.highlighted = false;
        }
        let catalog = Catalog { systems };
        for (from, to) in catalog.dangling_connections() {
            debug!(%from, %to, "connection target not in catalog");
        }
        Ok(catalog)
    }

    /// A catalog with no systems. Every graph operation on it is a no-op.
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Parse a YAML document of the form `systems: [...]`.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(text)?;
        Catalog::new(file.systems)
    }

    /// Parse a JSON document of the form `{"systems": [...]}`.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Catalog::new(file.systems)
    }

    /// Load a catalog file; `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Catalog::from_json_str(&text),
            _ => Catalog::from_yaml_str(&text),
        }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Systems in catalog order.
    pub fn systems(&self) -> &[EarthSystem] {
        &self.systems
    }

    pub fn iter(&self) -> impl Iterator<Item = &EarthSystem> {
        self.systems.iter()
    }

    /// Position of `id` in catalog order.
    pub fn index_of(&self, id: &SystemId) -> Option<usize> {
        self.systems.iter().position(|s| &s.id == id)
    }

    pub fn get(&self, id: &SystemId) -> Option<&EarthSystem> {
        self.systems.iter().find(|s| &s.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&EarthSystem> {
        self.systems.get(index)
    }

    /// Systems currently flagged as highlighted, in catalog order.
    pub fn highlighted(&self) -> impl Iterator<Item = &EarthSystem> {
        self.systems.iter().filter(|s| s.highlighted)
    }

    /// `(from, to)` pairs whose target id does not resolve.
    pub fn dangling_connections(&self) -> Vec<(SystemId, SystemId)> {
        let mut out = Vec::new();
        for s in &self.systems {
            for c in &s.connections {
                if self.get(c).is_none() {
                    out.push((s.id.clone(), c.clone()));
                }
            }
        }
        out
    }

    pub(crate) fn systems_mut(&mut self) -> &mut [EarthSystem] {
        &mut self.systems
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    name: &str,
    icon: &str,
    (x, y): (f64, f64),
    description: &str,
    impacts: [(&str, &str); 3],
    connections: [&str; 3],
    (mission, data_type, update_frequency): (&str, &str, &str),
) -> EarthSystem {
    EarthSystem {
        id: SystemId::new(id),
        name: name.to_string(),
        icon: icon.to_string(),
        position: Some(Position::new(x, y)),
        description: description.to_string(),
        impacts: impacts
            .iter()
            .map(|(value, label)| StaticImpact {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
        connections: connections.iter().map(|c| SystemId::new(*c)).collect(),
        mission: Some(MissionInfo {
            mission: mission.to_string(),
            data_type: data_type.to_string(),
            update_frequency: update_frequency.to_string(),
        }),
        highlighted: false,
    }
}

/// The seven built-in Earth systems.
pub fn default_catalog() -> Catalog {
    let systems = vec![
        seed(
            "atmosphere",
            "Atmosphere",
            "☁️",
            (300.0, 100.0),
            "The atmosphere regulates Earth's temperature and protects us from harmful radiation. Changes in atmospheric composition affect all other Earth systems.",
            [
                ("+1.1°C", "Global Temperature Rise"),
                ("421 ppm", "CO₂ Concentration"),
                ("15%", "Extreme Weather Increase"),
            ],
            ["water", "biodiversity", "agriculture"],
            ("OCO-2", "Carbon Dioxide Monitoring", "Daily"),
        ),
        seed(
            "water",
            "Water Resources",
            "💧",
            (600.0, 150.0),
            "Water cycles connect oceans, atmosphere, and land. Changes in water availability affect agriculture, ecosystems, and human communities.",
            [
                ("2.1B", "People Facing Water Stress"),
                ("-13%", "Arctic Ice Coverage"),
                ("3.3mm/yr", "Sea Level Rise"),
            ],
            ["atmosphere", "agriculture", "biodiversity"],
            ("GRACE-FO", "Groundwater and Ice Mass", "Monthly"),
        ),
        seed(
            "biodiversity",
            "Biodiversity",
            "🦋",
            (900.0, 200.0),
            "Biodiversity maintains ecosystem stability and provides essential services. Loss of species affects food webs and ecosystem functions.",
            [
                ("1M", "Species at Risk"),
                ("-68%", "Wildlife Population Decline"),
                ("75%", "Insect Pollinator Loss Risk"),
            ],
            ["agriculture", "atmosphere", "wildfire"],
            ("MODIS", "Vegetation and Land Cover", "Weekly"),
        ),
        seed(
            "agriculture",
            "Agriculture",
            "🌾",
            (200.0, 350.0),
            "Agriculture feeds the world but also impacts land, water, and atmosphere. Climate change affects crop yields and food security.",
            [
                ("-5%", "Global Crop Yields"),
                ("828M", "People Facing Hunger"),
                ("24%", "GHG from Agriculture"),
            ],
            ["water", "biodiversity", "atmosphere"],
            ("Landsat 8", "Crop Health Monitoring", "16 days"),
        ),
        seed(
            "wildfire",
            "Wildfires",
            "🔥",
            (500.0, 400.0),
            "Wildfires are increasing in frequency and intensity due to climate change, affecting air quality, ecosystems, and communities.",
            [
                ("+50%", "Fire Season Length"),
                ("2x", "Area Burned Annually"),
                ("339M", "People Exposed to Smoke"),
            ],
            ["atmosphere", "biodiversity", "health"],
            ("VIIRS", "Active Fire Detection", "Real-time"),
        ),
        seed(
            "energy",
            "Energy",
            "⚡",
            (800.0, 450.0),
            "Energy production and consumption drive climate change. Transitioning to renewable energy is crucial for sustainability.",
            [
                ("30%", "Renewable Energy Share"),
                ("36.8Gt", "Annual CO₂ Emissions"),
                ("2.8TW", "Solar/Wind Capacity"),
            ],
            ["atmosphere", "water", "biodiversity"],
            ("DSCOVR", "Solar Radiation Monitoring", "Hourly"),
        ),
        seed(
            "health",
            "Human Health",
            "🏥",
            (1000.0, 350.0),
            "Climate change affects human health through heat stress, disease spread, air quality, and food security.",
            [
                ("250K", "Annual Climate Deaths"),
                ("7M", "Air Pollution Deaths"),
                ("2B", "At Risk from Dengue"),
            ],
            ["atmosphere", "water", "wildfire"],
            ("TEMPO", "Air Quality Monitoring", "Hourly"),
        ),
    ];
    Catalog { systems }
}
