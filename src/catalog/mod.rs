//! The passport catalog: a partner-branded, read-only collection of
//! geofenced collectible events.
//!
//! The catalog is fetched once per session and shared immutably; nothing in
//! the UI writes back to it. Insertion order of `events` is significant:
//! the first event with a usable coordinate seeds the camera.

pub mod fetch;

pub use fetch::{CatalogSource, HttpCatalogSource};

use crate::core::{constants::FALLBACK_POSITION, geo::LatLng};
use crate::{PassportError, Result};
use serde::{Deserialize, Serialize};

/// One geofenced collectible.
///
/// Created once from the catalog fetch and never mutated. The optional
/// fields feed the detail panel; older catalog documents omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportEvent {
    pub id: String,
    pub image_url: String,
    pub location: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_until: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_hint: Option<String>,
}

impl PassportEvent {
    /// Display title for the detail panel; falls back to the event id.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Position of this event, or `None` when the coordinates are unusable.
    pub fn valid_position(&self) -> Option<LatLng> {
        self.location.is_finite().then_some(self.location)
    }
}

/// Branding for the catalog partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportPartner {
    pub display_name: String,
    pub profile_image: String,
}

/// The catalog root: passport metadata plus its events and partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportData {
    pub name: String,
    pub description: String,
    pub events: Vec<PassportEvent>,
    pub partner: PassportPartner,
}

/// Wire shape of the fetched JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub passport: PassportData,
}

impl PassportData {
    /// Parses a raw catalog document (`{ "passport": { ... } }`).
    pub fn from_json(raw: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(raw).map_err(PassportError::Serialization)?;
        Ok(document.passport)
    }

    /// Scans events in order and returns the first finite position, falling
    /// back to a fixed city-level coordinate so the camera always has a
    /// legal initial target even with malformed data.
    pub fn first_valid_position(&self) -> LatLng {
        self.events
            .iter()
            .find_map(|event| event.valid_position())
            .unwrap_or(FALLBACK_POSITION)
    }

    /// Looks up an event by id.
    pub fn event_by_id(&self, id: &str) -> Option<&PassportEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "passport": {
                "name": "Chinatown Manhole Covers",
                "description": "Collect the painted manhole covers of Yaowarat.",
                "events": [
                    {
                        "id": "crosswalk-chaloem-buri",
                        "image_url": "https://example.com/badges/crosswalk.png",
                        "location": { "lat": 13.7386, "lng": 100.5133 }
                    },
                    {
                        "id": "tien-fah",
                        "image_url": "https://example.com/badges/tien-fah.png",
                        "location": { "lat": 13.7566, "lng": 100.5025 },
                        "title": "Tien Fah Foundation Gate",
                        "available_from": "4 Dec 2024 00:00",
                        "available_until": "31 Dec 2025 23:59"
                    }
                ],
                "partner": {
                    "display_name": "Coral",
                    "profile_image": "https://example.com/coral.png"
                }
            }
        }"#
    }

    #[test]
    fn test_parse_catalog_document() {
        let passport = PassportData::from_json(sample_json()).unwrap();
        assert_eq!(passport.name, "Chinatown Manhole Covers");
        assert_eq!(passport.events.len(), 2);
        assert_eq!(passport.partner.display_name, "Coral");
        assert_eq!(passport.events[0].id, "crosswalk-chaloem-buri");
        assert!(passport.events[0].title.is_none());
        assert_eq!(
            passport.events[1].available_until.as_deref(),
            Some("31 Dec 2025 23:59")
        );
    }

    #[test]
    fn test_parse_rejects_malformed_document() {
        assert!(PassportData::from_json("{}").is_err());
        assert!(PassportData::from_json("not json").is_err());
    }

    #[test]
    fn test_first_valid_position_uses_insertion_order() {
        let passport = PassportData::from_json(sample_json()).unwrap();
        assert_eq!(
            passport.first_valid_position(),
            LatLng::new(13.7386, 100.5133)
        );
    }

    #[test]
    fn test_first_valid_position_skips_bad_coordinates() {
        let mut passport = PassportData::from_json(sample_json()).unwrap();
        passport.events[0].location = LatLng::new(f64::NAN, 100.5133);
        assert_eq!(
            passport.first_valid_position(),
            LatLng::new(13.7566, 100.5025)
        );
    }

    #[test]
    fn test_first_valid_position_falls_back_to_city() {
        let mut passport = PassportData::from_json(sample_json()).unwrap();
        for event in &mut passport.events {
            event.location = LatLng::new(f64::NAN, f64::NAN);
        }
        assert_eq!(passport.first_valid_position(), FALLBACK_POSITION);

        passport.events.clear();
        assert_eq!(passport.first_valid_position(), FALLBACK_POSITION);
    }

    #[test]
    fn test_event_lookup() {
        let passport = PassportData::from_json(sample_json()).unwrap();
        assert!(passport.event_by_id("tien-fah").is_some());
        assert!(passport.event_by_id("missing").is_none());
        assert_eq!(
            passport.event_by_id("tien-fah").unwrap().display_title(),
            "Tien Fah Foundation Gate"
        );
        assert_eq!(
            passport
                .event_by_id("crosswalk-chaloem-buri")
                .unwrap()
                .display_title(),
            "crosswalk-chaloem-buri"
        );
    }
}
