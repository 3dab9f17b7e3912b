pub mod camera;
pub mod registry;
pub mod settings;

pub use camera::{CameraMode, CameraRig};
pub use registry::{AppendReport, Registry};
pub use settings::ViewerSettings;

use shared::{BoxDescriptor, LineDescriptor, ProfileError};

use crate::scene::{DrawSet, ObjectId, SceneGraph};

/// Combined viewer state: the scene graph, one registry per descriptor kind, and
/// the camera.
pub struct ViewerState<S: SceneGraph = DrawSet> {
    pub scene: S,
    pub boxes: Registry<BoxDescriptor>,
    pub lines: Registry<LineDescriptor>,
    pub camera: CameraRig,
    pub settings: ViewerSettings,
}

impl Default for ViewerState<DrawSet> {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl ViewerState<DrawSet> {
    /// Empty viewer rendering into an in-memory draw set
    pub fn new(settings: ViewerSettings) -> Self {
        let scene = DrawSet::new(&settings.colors, &settings.materials, &settings.scene);
        Self::with_scene(scene, settings)
    }
}

impl<S: SceneGraph> ViewerState<S> {
    /// Empty viewer rendering into `scene`
    pub fn with_scene(scene: S, settings: ViewerSettings) -> Self {
        Self {
            scene,
            boxes: Registry::new(),
            lines: Registry::new(),
            camera: CameraRig::new(&settings.camera, &settings.auto_rotate),
            settings,
        }
    }

    /// Add the configured startup boxes and lines
    pub fn load_initial_profile(&mut self) -> (AppendReport, AppendReport) {
        let boxes = self.settings.initial.boxes.clone();
        let lines = self.settings.initial.lines.clone();
        let reports = (self.add_boxes(&boxes), self.add_lines(&lines));
        tracing::info!(
            "Loaded initial profile ({} boxes, {} lines)",
            self.boxes.len(),
            self.lines.len()
        );
        reports
    }

    // ── Profile operations ───────────────────────────────────

    pub fn add_boxes(&mut self, profile: &str) -> AppendReport {
        self.boxes.append(&mut self.scene, profile)
    }

    pub fn add_lines(&mut self, profile: &str) -> AppendReport {
        self.lines.append(&mut self.scene, profile)
    }

    pub fn export_boxes(&self) -> String {
        self.boxes.export()
    }

    pub fn export_lines(&self) -> String {
        self.lines.export()
    }

    pub fn delete_last_box(&mut self) -> Option<ObjectId> {
        self.boxes.remove_last(&mut self.scene)
    }

    pub fn delete_last_line(&mut self) -> Option<ObjectId> {
        self.lines.remove_last(&mut self.scene)
    }

    pub fn delete_all_boxes(&mut self) -> usize {
        self.boxes.remove_all(&mut self.scene)
    }

    pub fn delete_all_lines(&mut self) -> usize {
        self.lines.remove_all(&mut self.scene)
    }

    /// Make boxes finer: replace every box with its 8 octants
    pub fn refine_boxes(&mut self) -> Result<AppendReport, ProfileError> {
        self.boxes.refine(&mut self.scene)
    }

    // ── Frame ────────────────────────────────────────────────

    /// Advance the camera by one frame
    pub fn tick(&mut self) {
        self.camera.update();
    }
}
