//! The region map: loaded geometry plus camera, selection and marker state.

use super::selection::{RegionStyle, SelectionChange, SelectionState};
use crate::camera::{CameraController, CameraSettings, DragAction, DragTracker, ViewportConstraints};
use crate::config::MapConfig;
use crate::error::LoadError;
use crate::geo::{
    self, BoundingBox, LoadReport, LoadedRegions, ProjectionParameters, Region, RegionMesh,
};
use crate::markers::{filter_in_region, Geolocated, MarkerPlacementCache, PinFade, PinSettings};
use glam::Vec2;

/// One region's render data for a frame.
#[derive(Debug, Clone, Copy)]
pub struct RegionDraw<'a> {
    pub index: usize,
    pub region: &'a Region,
    /// Triangle indices into `region.vertices()` pairs.
    pub triangles: &'a [u32],
    pub style: RegionStyle,
}

/// Root state of the map view.
///
/// Geometry is loaded once and never changes. Everything per-frame runs in
/// time linear in the number of regions.
#[derive(Debug, Clone)]
pub struct RegionMap {
    config: MapConfig,
    regions: Vec<Region>,
    meshes: Vec<RegionMesh>,
    params: ProjectionParameters,
    report: LoadReport,
    camera: CameraController,
    selection: SelectionState,
    placements: MarkerPlacementCache,
    drag: DragTracker,
    pin_settings: PinSettings,
}

impl RegionMap {
    /// Loads regions from a GeoJSON document.
    pub fn from_geojson(geojson_str: &str, config: MapConfig) -> Result<Self, LoadError> {
        let config = config.validated();
        let loaded = geo::load_regions(geojson_str, &config)?;
        Ok(Self::from_loaded(loaded, config))
    }

    /// Builds the map from already loaded regions.
    ///
    /// `config` is [validated](MapConfig::validated) first.
    pub fn from_loaded(loaded: LoadedRegions, config: MapConfig) -> Self {
        let config = config.validated();
        let LoadedRegions {
            regions,
            params,
            map_bounds,
            report,
        } = loaded;

        let meshes: Vec<RegionMesh> = regions.iter().map(RegionMesh::build).collect();

        let map_bounds = map_bounds.unwrap_or_else(|| {
            BoundingBox::new(0.0, config.world_width, 0.0, config.world_height)
        });
        let constraints =
            ViewportConstraints::new(map_bounds, config.world_width, config.world_height);
        let camera = CameraController::new(constraints, CameraSettings::from(&config));

        Self {
            placements: MarkerPlacementCache::new(config.max_placement_attempts),
            drag: DragTracker::new(config.drag_threshold),
            pin_settings: PinSettings::from(&config),
            config,
            regions,
            meshes,
            params,
            report,
            camera,
            selection: SelectionState::new(),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// Index of the region with identifier `id`.
    pub fn region_index(&self, id: &str) -> Option<usize> {
        self.regions.iter().position(|r| r.id() == id)
    }

    pub fn mesh(&self, index: usize) -> Option<&RegionMesh> {
        self.meshes.get(index)
    }

    pub fn params(&self) -> &ProjectionParameters {
        &self.params
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn pin_settings(&self) -> &PinSettings {
        &self.pin_settings
    }

    /// Projects a latitude/longitude pair into world coordinates.
    pub fn project(&self, lat: f32, lon: f32) -> Vec2 {
        self.params.project(lat, lon)
    }

    /// Per-frame update: advances the camera, then recomputes hover from the
    /// cursor (in viewport units), if any. Returns the hovered region.
    pub fn update(&mut self, delta_time: f32, cursor: Option<Vec2>) -> Option<usize> {
        self.camera.tick(delta_time);
        let world = cursor.map(|c| self.camera.unproject(c));
        self.selection.update_hover(&self.regions, world)
    }

    /// Activates the hovered region and starts the matching camera
    /// transition.
    pub fn activate(&mut self) -> SelectionChange {
        let change = self.selection.activate();
        match change {
            SelectionChange::Selected { index, previous } => {
                let region = &self.regions[index];
                log::debug!("Selected region {}", region.id());
                self.camera.focus_on_region(region, previous.is_some());
            }
            SelectionChange::Deselected { index } => {
                log::debug!("Deselected region {}", self.regions[index].id());
                self.camera.unfocus();
            }
            SelectionChange::None => {}
        }
        change
    }

    /// Hovers whatever is under `screen` and activates it.
    pub fn click(&mut self, screen: Vec2) -> SelectionChange {
        let world = self.camera.unproject(screen);
        self.selection.update_hover(&self.regions, Some(world));
        self.activate()
    }

    /// Pointer pressed at `screen`.
    pub fn pointer_down(&mut self, screen: Vec2) {
        self.drag.press(screen);
    }

    /// Pointer moved while pressed. Returns `true` if the map panned.
    pub fn pointer_drag(&mut self, screen: Vec2) -> bool {
        match self.drag.drag(screen) {
            DragAction::Pan { from, to } => {
                self.camera.pan_by_screen(from, to);
                true
            }
            DragAction::None => false,
        }
    }

    /// Pointer released. Returns `true` if the gesture was a pan; otherwise
    /// the host should treat it as a click.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.release()
    }

    /// Scroll-wheel zoom about `cursor`.
    pub fn scroll(&mut self, cursor: Vec2, amount: f32) {
        self.camera.scroll(cursor, amount);
    }

    /// Shows or hides the side panel.
    pub fn set_panel_open(&mut self, open: bool) {
        self.camera.set_panel_pinned(open);
    }

    /// Clears the selection and snaps back to the default view.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.camera.reset();
    }

    /// Resizes the viewport. `panel_width` comes from the host's layout,
    /// typically [`MapConfig::panel_width`] of the screen width.
    pub fn on_resize(&mut self, world_width: f32, world_height: f32, panel_width: f32) {
        self.camera.on_resize(world_width, world_height, panel_width);
    }

    /// Stable pin position for `entity_id` inside region `index`.
    pub fn place_marker(&mut self, index: usize, entity_id: &str) -> Option<Vec2> {
        let region = self.regions.get(index)?;
        Some(self.placements.place(region, entity_id))
    }

    /// Items geofenced into region `index`, in input order.
    pub fn items_in_region<'a, T: Geolocated>(&self, items: &'a [T], index: usize) -> Vec<&'a T> {
        match self.regions.get(index) {
            Some(region) => filter_in_region(items, region, &self.params),
            None => Vec::new(),
        }
    }

    /// Fading-in pins for the given entities inside region `index`.
    pub fn news_pins<'a>(
        &mut self,
        index: usize,
        entity_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<PinFade> {
        let Some(region) = self.regions.get(index) else {
            return Vec::new();
        };
        entity_ids
            .into_iter()
            .map(|id| PinFade::new(id, self.placements.place(region, id)))
            .collect()
    }

    /// Regions to draw this frame, back to front.
    ///
    /// Regions entirely off screen are culled. The selected region comes
    /// after the normal ones and a hovered region last, so highlights are
    /// drawn on top.
    pub fn draw_list(&self) -> Vec<RegionDraw<'_>> {
        let visible = self.camera.visible_rect();

        let mut list: Vec<RegionDraw<'_>> = self
            .regions
            .iter()
            .zip(&self.meshes)
            .enumerate()
            .filter(|(_, (region, _))| region.bounding_box().intersects(&visible))
            .map(|(index, (region, mesh))| RegionDraw {
                index,
                region,
                triangles: &mesh.indices,
                style: self.selection.style(index),
            })
            .collect();

        list.sort_by_key(|d| match d.style {
            RegionStyle::Normal => 0,
            RegionStyle::Selected => 1,
            RegionStyle::Hovered => 2,
        });
        list
    }
}
