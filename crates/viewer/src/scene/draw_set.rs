//! In-memory draw set

use std::collections::HashMap;

use glam::Vec3;
use shared::{BoxDescriptor, Color, LineDescriptor};

use super::mesh::{self, LineMeshData, MeshData, SegmentMeshData};
use super::palette::{resolve_color, Rgb};
use super::{ObjectId, SceneGraph};
use crate::state::settings::{ColorSettings, MaterialSettings, SceneSettings};

const FALLBACK_BOX_COLOR: Rgb = [1.0, 1.0, 1.0];
const FALLBACK_LINE_COLOR: Rgb = [1.0, 0.2, 0.2];
const FALLBACK_BACKGROUND: Rgb = [0.8, 0.8, 0.8];
const GRID_CENTER_COLOR: Rgb = [0.267, 0.267, 0.267];
const GRID_LINE_COLOR: Rgb = [0.533, 0.533, 0.533];

/// Flat material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub opacity: f32,
}

impl Material {
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Object held by the draw set
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    /// Box mesh centred on its local origin, placed at `position`
    Box {
        mesh: MeshData,
        position: Vec3,
        material: Material,
    },
    /// Polyline in world coordinates
    Line {
        line: LineMeshData,
        material: Material,
    },
}

impl Renderable {
    pub fn material(&self) -> &Material {
        match self {
            Renderable::Box { material, .. } | Renderable::Line { material, .. } => material,
        }
    }

    pub fn is_box(&self) -> bool {
        matches!(self, Renderable::Box { .. })
    }
}

/// Static helpers drawn alongside the registered objects
#[derive(Debug, Clone, PartialEq)]
pub struct SceneHelpers {
    pub axis: SegmentMeshData,
    pub grid: SegmentMeshData,
    /// Exponential fog density; the fog color is the background
    pub fog_density: f32,
}

impl SceneHelpers {
    pub fn new(settings: &SceneSettings) -> Self {
        Self {
            axis: mesh::axes(settings.axis_length),
            grid: mesh::grid(
                settings.grid_size,
                settings.grid_divisions,
                GRID_CENTER_COLOR,
                GRID_LINE_COLOR,
            ),
            fog_density: settings.fog_density,
        }
    }
}

/// Scene graph keeping renderables in memory, keyed by UUID handles
#[derive(Debug, Clone)]
pub struct DrawSet {
    objects: HashMap<ObjectId, Renderable>,
    background: Rgb,
    helpers: SceneHelpers,
    box_material: Material,
    colored_box_opacity: f32,
    line_material: Material,
}

impl Default for DrawSet {
    fn default() -> Self {
        Self::new(
            &ColorSettings::default(),
            &MaterialSettings::default(),
            &SceneSettings::default(),
        )
    }
}

impl DrawSet {
    pub fn new(colors: &ColorSettings, materials: &MaterialSettings, scene: &SceneSettings) -> Self {
        Self {
            objects: HashMap::new(),
            background: resolve_or(&colors.background, FALLBACK_BACKGROUND),
            helpers: SceneHelpers::new(scene),
            box_material: Material {
                color: resolve_or(&colors.boxes, FALLBACK_BOX_COLOR),
                opacity: materials.box_opacity,
            },
            colored_box_opacity: materials.colored_box_opacity,
            line_material: Material {
                color: resolve_or(&colors.lines, FALLBACK_LINE_COLOR),
                opacity: 1.0,
            },
        }
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Axis, grid and fog; not part of any registry
    pub fn helpers(&self) -> &SceneHelpers {
        &self.helpers
    }

    pub fn get(&self, id: &ObjectId) -> Option<&Renderable> {
        self.objects.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.keys()
    }

    pub fn box_count(&self) -> usize {
        self.objects.values().filter(|r| r.is_box()).count()
    }

    pub fn line_count(&self) -> usize {
        self.objects.len() - self.box_count()
    }

    fn box_material(&self, color: Option<&Color>) -> Material {
        match color.and_then(|c| resolve_token(c, "box")) {
            Some(color) => Material {
                color,
                opacity: self.colored_box_opacity,
            },
            None => self.box_material.clone(),
        }
    }

    fn line_material(&self, color: Option<&Color>) -> Material {
        match color.and_then(|c| resolve_token(c, "line")) {
            Some(color) => Material {
                color,
                opacity: 1.0,
            },
            None => self.line_material.clone(),
        }
    }

    fn insert(&mut self, renderable: Renderable) -> ObjectId {
        let id = uuid::Uuid::new_v4().to_string();
        self.objects.insert(id.clone(), renderable);
        id
    }
}

fn resolve_or(token: &str, fallback: Rgb) -> Rgb {
    resolve_color(token).unwrap_or_else(|| {
        tracing::warn!("Unknown color '{token}' in settings, using fallback");
        fallback
    })
}

fn resolve_token(color: &Color, kind: &str) -> Option<Rgb> {
    let rgb = resolve_color(color.as_str());
    if rgb.is_none() {
        tracing::warn!("Unknown {kind} color '{color}', using default material");
    }
    rgb
}

impl SceneGraph for DrawSet {
    fn add_box(&mut self, descriptor: &BoxDescriptor) -> ObjectId {
        let material = self.box_material(descriptor.color());
        let [w, h, d] = descriptor.dimensions();
        let [cx, cy, cz] = descriptor.center();
        let renderable = Renderable::Box {
            mesh: mesh::cube(Vec3::new(w as f32, h as f32, d as f32), material.color),
            position: Vec3::new(cx as f32, cy as f32, cz as f32),
            material,
        };
        self.insert(renderable)
    }

    fn add_line(&mut self, descriptor: &LineDescriptor) -> ObjectId {
        let material = self.line_material(descriptor.color());
        let renderable = Renderable::Line {
            line: mesh::polyline(descriptor.points(), material.color, material.opacity),
            material,
        };
        self.insert(renderable)
    }

    fn remove(&mut self, id: &ObjectId) -> bool {
        self.objects.remove(id).is_some()
    }

    fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    fn len(&self) -> usize {
        self.objects.len()
    }
}
