use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{InputError, LoadError, Result};

/// Zero-based location identifier used throughout the graph and search code.
///
/// Source data numbers locations from 1; [`Location::record_id`] recovers that
/// numbering for display.
pub type LocationId = usize;

/// Longest display name accepted from the data files.
pub const MAX_NAME_LEN: usize = 50;

/// Similarity floor for fuzzy name suggestions (Jaro-Winkler score).
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Projected 2D coordinates of a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A named point on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: LocationId,
    /// Identifier as written in the source data.
    pub source_id: u32,
    pub name: String,
    pub position: Position,
}

impl Location {
    /// The 1-based identifier used by the source data.
    pub fn record_id(&self) -> u32 {
        self.source_id
    }
}

/// Raw location row as it appears in the data files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationRecord {
    pub id: u32,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Immutable set of locations ordered by identifier.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: Vec<Location>,
    name_to_id: HashMap<String, LocationId>,
}

impl LocationRegistry {
    /// Validate raw records and build the registry.
    ///
    /// Identifiers must be positive, unique and contiguous from 1 to N; they
    /// are stored 0-based. Names must be non-empty and at most
    /// [`MAX_NAME_LEN`] characters, and coordinates must be finite. When two
    /// locations share a name, lookups by name resolve to the lower id.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = LocationRecord>,
    {
        let mut records: Vec<LocationRecord> = records.into_iter().collect();

        for record in &records {
            if record.id == 0 {
                return Err(LoadError::ZeroLocationId {
                    name: record.name.clone(),
                }
                .into());
            }
            let length = record.name.chars().count();
            if length == 0 || length > MAX_NAME_LEN {
                return Err(LoadError::InvalidName {
                    id: record.id,
                    name: record.name.clone(),
                    max: MAX_NAME_LEN,
                }
                .into());
            }
            if !record.x.is_finite() || !record.y.is_finite() {
                return Err(LoadError::InvalidCoordinate { id: record.id }.into());
            }
        }

        records.sort_by_key(|record| record.id);
        let max = records.last().map(|record| record.id).unwrap_or(0);

        let mut locations = Vec::with_capacity(records.len());
        let mut name_to_id = HashMap::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if index > 0 && record.id == index as u32 {
                return Err(LoadError::DuplicateLocation { id: record.id }.into());
            }
            let expected = index as u32 + 1;
            if record.id != expected {
                return Err(LoadError::MissingLocation { id: expected, max }.into());
            }

            if let Some(&existing) = name_to_id.get(&record.name) {
                warn!(
                    name = %record.name,
                    kept = existing + 1,
                    ignored = record.id,
                    "duplicate location name; lookups resolve to the lower id"
                );
            } else {
                name_to_id.insert(record.name.clone(), index);
            }

            locations.push(Location {
                id: index,
                source_id: record.id,
                name: record.name,
                position: Position {
                    x: record.x,
                    y: record.y,
                },
            });
        }

        debug!(locations = locations.len(), "built location registry");
        Ok(Self {
            locations,
            name_to_id,
        })
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Lookup a location name by identifier.
    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.get(id).map(|location| location.name.as_str())
    }

    /// Iterate locations in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Lookup a location identifier by its case-sensitive name.
    pub fn id_by_name(&self, name: &str) -> Option<LocationId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve a name to an identifier, suggesting close matches on failure.
    pub fn resolve(&self, name: &str) -> Result<LocationId> {
        self.id_by_name(name).ok_or_else(|| {
            InputError::UnknownLocation {
                name: name.to_string(),
                suggestions: self.fuzzy_matches(name, 3),
            }
            .into()
        })
    }

    /// Names most similar to `query`, best first, at most `limit` of them.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.to_lowercase();
        let mut scored: Vec<(f64, &Location)> = self
            .locations
            .iter()
            .map(|location| {
                let score = strsim::jaro_winkler(&query, &location.name.to_lowercase());
                (score, location)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|(a_score, a), (b_score, b)| {
            b_score.total_cmp(a_score).then_with(|| a.id.cmp(&b.id))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, location)| location.name.clone())
            .collect()
    }

    /// The location closest to `(x, y)` that lies within `radius`.
    ///
    /// Ties go to the lowest identifier.
    pub fn nearest(&self, x: f64, y: f64, radius: f64) -> Option<LocationId> {
        let target = Position { x, y };
        let mut best: Option<(LocationId, f64)> = None;
        for location in &self.locations {
            let distance = location.position.distance_to(&target);
            if distance > radius {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((location.id, distance)),
            }
        }
        best.map(|(id, _)| id)
    }
}
