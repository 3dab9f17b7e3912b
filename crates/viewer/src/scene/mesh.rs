use glam::Vec3;

use shared::Vec3d;

use super::palette::Rgb;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned extent (width, height, depth) of the vertex positions
    pub fn extent(&self) -> [f32; 3] {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in self.vertices.chunks_exact(9) {
            let p = Vec3::new(v[0], v[1], v[2]);
            min = min.min(p);
            max = max.max(p);
        }
        if self.vertices.is_empty() {
            return [0.0; 3];
        }
        (max - min).to_array()
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Debug, Clone, PartialEq)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 7
    }

    pub fn segment_count(&self) -> usize {
        self.vertex_count().saturating_sub(1)
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        let base = index * 7;
        self.vertices
            .get(base..base + 3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }
}

/// Face normal with the two in-plane axes, ordered so `u × v == normal`
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
];

/// Independent line segments: vertices taken in pairs, same layout as [`LineMeshData`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentMeshData {
    pub vertices: Vec<f32>,
}

impl SegmentMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 7
    }

    pub fn segment_count(&self) -> usize {
        self.vertex_count() / 2
    }

    /// Endpoints of segment `index`
    pub fn segment(&self, index: usize) -> Option<(Vec3, Vec3)> {
        let base = index * 14;
        let v = self.vertices.get(base..base + 14)?;
        Some((Vec3::new(v[0], v[1], v[2]), Vec3::new(v[7], v[8], v[9])))
    }

    fn push(&mut self, a: Vec3, b: Vec3, color: Rgb) {
        for p in [a, b] {
            self.vertices
                .extend_from_slice(&[p.x, p.y, p.z, color[0], color[1], color[2], 1.0]);
        }
    }
}

/// Box mesh of the given width/height/depth, centred on the local origin.
///
/// Four vertices per face so each face gets a flat normal; triangles wind
/// counter-clockwise seen from outside.
pub fn cube(extent: Vec3, color: Rgb) -> MeshData {
    let half = extent * 0.5;

    let mut vertices = Vec::with_capacity(FACES.len() * 4 * 9);
    let mut indices = Vec::with_capacity(FACES.len() * 6);

    for (normal, u, v) in FACES {
        let base = (vertices.len() / 9) as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (normal + u * su + v * sv) * half;
            vertices.extend_from_slice(&[p.x, p.y, p.z]);
            vertices.extend_from_slice(&normal.to_array());
            vertices.extend_from_slice(&color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// World axis helper: X red, Y green, Z blue, from the origin to `length`
pub fn axes(length: f32) -> SegmentMeshData {
    let mut mesh = SegmentMeshData::default();
    mesh.push(Vec3::ZERO, Vec3::X * length, [1.0, 0.0, 0.0]);
    mesh.push(Vec3::ZERO, Vec3::Y * length, [0.0, 1.0, 0.0]);
    mesh.push(Vec3::ZERO, Vec3::Z * length, [0.0, 0.0, 1.0]);
    mesh
}

/// Square grid on the XZ plane centred on the origin, `divisions` cells per side.
/// The two lines through the origin use `center_color`.
pub fn grid(size: f32, divisions: u32, center_color: Rgb, line_color: Rgb) -> SegmentMeshData {
    let mut mesh = SegmentMeshData::default();
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;

    for i in 0..=divisions {
        let k = -half + step * i as f32;
        let color = if i * 2 == divisions { center_color } else { line_color };
        mesh.push(Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k), color);
        mesh.push(Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half), color);
    }
    mesh
}

/// Polyline vertex buffer in world coordinates
pub fn polyline(points: &[Vec3d], color: Rgb, alpha: f32) -> LineMeshData {
    let mut vertices = Vec::with_capacity(points.len() * 7);
    for p in points {
        vertices.extend_from_slice(&[
            p[0] as f32,
            p[1] as f32,
            p[2] as f32,
            color[0],
            color[1],
            color[2],
            alpha,
        ]);
    }
    LineMeshData { vertices }
}
