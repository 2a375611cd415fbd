//! Prelude module for common passbook types and traits
//!
//! This module re-exports the most commonly used types, traits, and
//! functions for easy importing with `use passbook::prelude::*;`

pub use crate::core::{
    constants,
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use crate::catalog::{
    CatalogSource, HttpCatalogSource, PassportData, PassportEvent, PassportPartner,
};

pub use crate::camera::{
    CameraAdapter, FlyToOptions, MapCamera, MarkerEvent, MarkerEventSender, MarkerEvents,
    Transition, TransitionManager, TransitionType,
};

pub use crate::view::{
    layout::{LayoutMode, LayoutResolver, Resolution},
    route::{MemoryRouter, RouteAction, Router, Tab},
    selection::SelectionState,
    sync::ViewSynchronizer,
};

#[cfg(feature = "egui")]
pub use crate::ui::{shell::PassportShell, style::ShellStyle};

pub use crate::{Error as PassportError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
