//! # Passbook
//!
//! A map-driven "digital passport" viewer for geofenced collectibles.
//!
//! The crate keeps four pieces of view state mutually consistent (the
//! selected event, the map camera, the URL tab parameter and the
//! responsive layout) and renders the result through a feature-gated
//! egui shell. The tile-rendering map widget itself is an external
//! collaborator; this crate provides the camera and marker-event
//! boundary it plugs into.

pub mod camera;
pub mod catalog;
pub mod core;
pub mod view;

#[cfg(feature = "egui")]
pub mod ui;

pub mod prelude;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use catalog::{PassportData, PassportEvent, PassportPartner};

pub use camera::{CameraAdapter, FlyToOptions, MapCamera, MarkerEvent, MarkerEvents};

pub use view::{
    layout::{LayoutMode, LayoutResolver},
    route::{MemoryRouter, RouteAction, Router, Tab},
    selection::SelectionState,
    sync::ViewSynchronizer,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum PassportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Route error: {0}")]
    Route(String),
}

/// Error type alias for convenience
pub type Error = PassportError;
