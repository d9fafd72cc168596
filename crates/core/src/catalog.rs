//! Restaurant catalog: the records shown on the map and in the sidebar.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::geo::Coordinate;

/// Dietary category of a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "veg")]
    Veg,
    #[serde(rename = "non-veg")]
    NonVeg,
}

impl Category {
    pub const ALL: &[Category] = &[Self::Veg, Self::NonVeg];

    /// Short identifier, as used in catalog files and popups.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Veg => "veg",
            Self::NonVeg => "non-veg",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Veg => "Vegetarian",
            Self::NonVeg => "Non-Vegetarian",
        }
    }
}

/// A single restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub position: Coordinate,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Name of a bundled image asset (e.g. `veg1.png`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl RestaurantRecord {
    pub fn new(
        position: Coordinate,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        image: Option<&str>,
    ) -> Self {
        Self {
            position,
            title: title.into(),
            description: description.into(),
            category,
            image: image.map(str::to_string),
        }
    }
}

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// An immutable list of restaurants.
///
/// Every catalog gets a process-unique revision on construction; derived
/// data (filtered views) is keyed on it.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<RestaurantRecord>,
    revision: u64,
}

impl Catalog {
    pub fn new(records: Vec<RestaurantRecord>) -> Self {
        Self {
            records,
            revision: NEXT_REVISION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The four restaurants shipped with the application.
    pub fn builtin() -> Self {
        Self::new(vec![
            RestaurantRecord::new(
                Coordinate::new(18.399376238216934, 73.91978675898407),
                "Shree Ganesh",
                "Vegetarian restaurant",
                Category::Veg,
                Some("veg1.png"),
            ),
            RestaurantRecord::new(
                Coordinate::new(18.549586683643685, 73.77275029799425),
                "PK Biryani",
                "Non-vegetarian restaurant",
                Category::NonVeg,
                Some("non-veg1.png"),
            ),
            RestaurantRecord::new(
                Coordinate::new(18.504249462631677, 73.9668214954424),
                "Krishna Pure Veg",
                "Vegetarian restaurant",
                Category::Veg,
                Some("veg2.png"),
            ),
            RestaurantRecord::new(
                Coordinate::new(18.6116920251189, 73.78338702285839),
                "Hotel Tambda-Pandhara",
                "Non-vegetarian restaurant",
                Category::NonVeg,
                Some("non-veg2.png"),
            ),
        ])
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<RestaurantRecord> = serde_json::from_str(json)?;
        for (index, record) in records.iter().enumerate() {
            if record.title.trim().is_empty() {
                return Err(CatalogError::InvalidRecord {
                    index,
                    title: record.title.clone(),
                    reason: "empty title".to_string(),
                });
            }
            if let Err(e) = record.position.validate() {
                return Err(CatalogError::InvalidRecord {
                    index,
                    title: record.title.clone(),
                    reason: e.to_string(),
                });
            }
        }
        Ok(Self::new(records))
    }

    /// Read a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&RestaurantRecord> {
        self.records.get(index)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
