// src/state/mod.rs
use eframe::egui::Vec2;
use tracing::{debug, error, info};

use crate::analysis::{national_summary, StateResolver, NATIONAL_NAME};
use crate::config::{Dataset, RegionId, RegionIdentifier, Settings, StateRecord, ThemeMode};
use crate::file::loader::MapResult;
use crate::file::FileManager;
use crate::map::RegionMap;

pub mod map_state;
pub mod search_state;
pub mod viewport;

pub use map_state::{bind_regions, BoundRegion, MapEvents, RegionInteraction, RegionState};
pub use search_state::SearchState;
pub use viewport::Viewport;

#[derive(Debug)]
pub enum MapLoadState {
    Loading,
    Ready(RegionMap),
    Failed(String),
}

/// What the stats and chart panels render.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    /// Nothing selected.
    National(StateRecord),
    State(&'a StateRecord),
    /// A selection that resolves to no record.
    NoData(String),
}

impl View<'_> {
    pub fn record(&self) -> Option<&StateRecord> {
        match self {
            View::National(record) => Some(record),
            View::State(record) => Some(record),
            View::NoData(_) => None,
        }
    }
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub dataset: Dataset,
    pub settings: Settings,
    pub file_manager: FileManager,

    // Map
    pub map: MapLoadState,
    pub regions: Vec<BoundRegion>,
    pub interaction: RegionInteraction,
    pub viewport: Viewport,

    // Minimal UI state
    pub search: SearchState,
    pub theme: ThemeMode,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings, dataset: Dataset) -> Self {
        Self {
            dataset,
            file_manager: FileManager::new(settings.region_policy),
            theme: settings.theme,
            settings,
            map: MapLoadState::Loading,
            regions: Vec::new(),
            interaction: RegionInteraction::default(),
            viewport: Viewport::default(),
            search: SearchState::default(),
            error_message: None,
        }
    }

    pub fn resolver(&self) -> StateResolver<'_> {
        StateResolver::new(&self.dataset)
    }

    /// The national summary is recomputed on every call.
    pub fn current_view(&self) -> View<'_> {
        match self.interaction.selected() {
            None => View::National(national_summary(&self.dataset)),
            Some(selected) => match self.resolver().by_name(&selected.name) {
                Some(record) => View::State(record),
                None => View::NoData(selected.name.clone()),
            },
        }
    }

    /// Name shown in the header badge.
    pub fn selected_name(&self) -> &str {
        self.interaction.selected()
            .map(|selected| selected.name.as_str())
            .unwrap_or(NATIONAL_NAME)
    }

    /// Selects a typed or suggested name. Names the dataset does not know are
    /// still selected so the panels can say there is no data.
    pub fn select_by_name(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let identifier = match self.resolver().by_name(name) {
            Some(record) => RegionIdentifier::from_name(record.full_name.clone()),
            None => {
                debug!("No record for '{}'", name);
                RegionIdentifier::from_name(name)
            }
        };
        self.interaction.select(identifier);
    }

    pub fn clear_selection(&mut self) {
        self.interaction.clear();
        self.search.clear();
    }

    pub fn begin_map_load(&mut self) {
        self.map = MapLoadState::Loading;
        self.regions.clear();
        self.interaction.hover(None);
    }

    pub fn map_loaded(&mut self, result: MapResult) {
        match result {
            Ok(map) => {
                self.regions = bind_regions(&map, &self.dataset);
                let interactive = self.regions.iter().filter(|r| r.has_data).count();
                info!("Map ready: {} regions, {} with data", self.regions.len(), interactive);
                self.map = MapLoadState::Ready(map);
            }
            Err(e) => {
                error!("Map unavailable: {}", e);
                self.regions.clear();
                self.map = MapLoadState::Failed(e.to_string());
            }
        }
    }

    /// Swaps in a freshly loaded dataset; selection is dropped and the map
    /// regions are re-bound against the new keys.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.interaction.reset();
        self.search.clear();
        if let MapLoadState::Ready(map) = &self.map {
            self.regions = bind_regions(map, &self.dataset);
        }
    }
}

impl MapEvents for AppState {
    fn on_select(&mut self, region: RegionIdentifier) {
        debug!("Selected {}", region.name);
        self.search.escape();
        self.interaction.select(region);
    }

    fn on_hover(&mut self, region: Option<RegionId>) {
        self.interaction.hover(region);
    }

    fn on_drag_delta(&mut self, delta: Vec2) {
        self.viewport.pan_by(delta);
    }
}
