// src/state/map_state.rs
use eframe::egui::Vec2;

use crate::analysis::{Lookup, StateResolver};
use crate::config::{Dataset, RegionId, RegionIdentifier};
use crate::map::RegionMap;

/// Visual state of one rendered region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    /// No dataset record; never interactive.
    NoData,
    Idle,
    Hovered,
    Selected,
}

/// Callbacks the map widget forwards pointer gestures to.
pub trait MapEvents {
    fn on_select(&mut self, region: RegionIdentifier);
    fn on_hover(&mut self, region: Option<RegionId>);
    fn on_drag_delta(&mut self, delta: Vec2);
}

/// A map shape paired with its table name and whether the dataset has a
/// record for it. Index-aligned with `RegionMap::shapes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundRegion {
    pub id: RegionId,
    pub name: Option<&'static str>,
    pub has_data: bool,
}

impl BoundRegion {
    /// Tooltip text: the table name, else the raw id.
    pub fn label(&self) -> &str {
        self.name.unwrap_or(self.id.as_str())
    }
}

pub fn bind_regions(map: &RegionMap, dataset: &Dataset) -> Vec<BoundRegion> {
    let resolver = StateResolver::new(dataset);
    map.shapes.iter()
        .map(|shape| BoundRegion {
            id: shape.id.clone(),
            name: shape.id.display_name(),
            has_data: resolver.resolve(Lookup::Region(&shape.id)).is_some(),
        })
        .collect()
}

/// Hover and selection. At most one region is selected at a time.
#[derive(Debug, Clone, Default)]
pub struct RegionInteraction {
    hovered: Option<RegionId>,
    selected: Option<RegionIdentifier>,
}

impl RegionInteraction {
    pub fn state_of(&self, region: &BoundRegion) -> RegionState {
        if !region.has_data {
            return RegionState::NoData;
        }
        match (&self.selected, &self.hovered) {
            (Some(selected), _) if selected.matches(&region.id, region.name) => RegionState::Selected,
            (_, Some(hovered)) if *hovered == region.id => RegionState::Hovered,
            _ => RegionState::Idle,
        }
    }

    pub fn hovered(&self) -> Option<&RegionId> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<&RegionIdentifier> {
        self.selected.as_ref()
    }

    /// Pointer enter/leave. Leaving every region passes `None`.
    pub fn hover(&mut self, region: Option<RegionId>) {
        self.hovered = region;
    }

    pub fn select(&mut self, region: RegionIdentifier) {
        self.selected = Some(region);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Forget everything, e.g. after the dataset or map was replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
