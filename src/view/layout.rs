use crate::view::route::{RouteAction, Tab};

/// The resolved presentation mode.
///
/// Derived fresh from the viewport-width predicate and the URL tab on every
/// reaction, never cached as independent mutable state, so the URL and the
/// rendered layout cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Side panel plus map.
    Desktop,
    /// Mobile badge grid.
    MobileGrid,
    /// Mobile map with bottom drawers.
    MobileMap,
}

/// Outcome of one layout resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub mode: LayoutMode,
    /// URL correction the caller must apply, if the inputs formed an
    /// invalid combination.
    pub correction: Option<RouteAction>,
    /// True when this resolution crossed the desktop breakpoint.
    pub crossed_breakpoint: bool,
}

/// Derives the active layout from `(is_desktop, tab)` and reconciles
/// invalid combinations.
///
/// The one invalid combination is desktop with `tab=map` (a stale mobile
/// URL or a shared link opened on a wide viewport): it resolves to
/// `Desktop` and demands the tab be dropped from the URL, rather than ever
/// rendering a map tab on desktop.
#[derive(Debug, Default)]
pub struct LayoutResolver {
    was_desktop: Option<bool>,
}

impl LayoutResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pure derivation table.
    pub fn mode_for(is_desktop: bool, tab: Option<Tab>) -> LayoutMode {
        match (is_desktop, tab) {
            (true, _) => LayoutMode::Desktop,
            (false, None) => LayoutMode::MobileGrid,
            (false, Some(Tab::Map)) => LayoutMode::MobileMap,
        }
    }

    /// Resolves the current inputs, tracking live breakpoint crossings.
    /// Runs on every reaction (resize, navigation, initial mount).
    pub fn resolve(&mut self, is_desktop: bool, tab: Option<Tab>) -> Resolution {
        let crossed_breakpoint = self
            .was_desktop
            .map(|was| was != is_desktop)
            .unwrap_or(false);
        self.was_desktop = Some(is_desktop);

        if crossed_breakpoint {
            #[cfg(feature = "debug")]
            log::debug!(
                "Breakpoint crossed: now {}",
                if is_desktop { "desktop" } else { "mobile" }
            );
        }

        let mode = Self::mode_for(is_desktop, tab);
        let correction = (is_desktop && tab == Some(Tab::Map)).then_some(RouteAction::ClearTab);

        Resolution {
            mode,
            correction,
            crossed_breakpoint,
        }
    }

    /// Whether the previous resolution saw a desktop viewport.
    pub fn was_desktop(&self) -> Option<bool> {
        self.was_desktop
    }
}
