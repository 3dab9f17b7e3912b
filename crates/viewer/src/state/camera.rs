//! Camera rig state: placement, control scheme and auto-orbit.
//!
//! Pointer and keyboard handling belong to the control scheme implementation;
//! this module only holds the state those controls and the orbit act on.

use std::ops::RangeInclusive;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::settings::{AutoRotateSettings, CameraSettings};

/// Range offered for the orbit radius
pub const RADIUS_RANGE: RangeInclusive<f32> = 1.0..=3.0;
/// Range offered for the orbit speed (radians per frame)
pub const SPEED_RANGE: RangeInclusive<f32> = 0.001..=0.01;
/// Bounds the tracked orbit radius is kept in every frame
const TRACKED_RADIUS: RangeInclusive<f32> = 0.5..=100.0;

/// Interchangeable camera control schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Rotate/zoom/pan around a target
    #[default]
    Trackball,
    /// Free flight with roll
    Fly,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Trackball => CameraMode::Fly,
            CameraMode::Fly => CameraMode::Trackball,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CameraMode::Trackball => "Trackball",
            CameraMode::Fly => "Fly",
        }
    }
}

/// Orbit parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoRotate {
    pub active: bool,
    pub direction: f32,
    pub radius: f32,
    pub speed: f32,
    pub angle: f32,
}

impl From<&AutoRotateSettings> for AutoRotate {
    fn from(settings: &AutoRotateSettings) -> Self {
        Self {
            active: settings.active,
            direction: if settings.direction < 0.0 { -1.0 } else { 1.0 },
            radius: settings.radius,
            speed: settings.speed,
            angle: 0.0,
        }
    }
}

/// Perspective camera with a look-at target
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub position: Vec3,
    pub up: Vec3,
    pub target: Vec3,
    pub mode: CameraMode,
    /// Vertical field of view (degrees)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub auto_rotate: AutoRotate,
    home: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraSettings::default(), &AutoRotateSettings::default())
    }
}

impl CameraRig {
    pub fn new(camera: &CameraSettings, rotation: &AutoRotateSettings) -> Self {
        let home = Vec3::from_array(camera.home);
        let mut rig = Self {
            position: home,
            up: Vec3::Y,
            target: Vec3::ZERO,
            mode: camera.mode,
            fov: camera.fov,
            near: camera.near,
            far: camera.far,
            auto_rotate: AutoRotate::from(rotation),
            home,
        };
        rig.reset();
        rig
    }

    /// Back to the home position, looking at the origin
    pub fn reset(&mut self) {
        self.position = self.home;
        self.look_at(Vec3::ZERO);
        self.axis_align();
    }

    /// Restore +Y as the up direction
    pub fn axis_align(&mut self) {
        self.up = Vec3::Y;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Switch control scheme, returning the new one
    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Horizontal distance from the Y axis
    pub fn distance_to_y_axis(&self) -> f32 {
        (self.position.x * self.position.x + self.position.z * self.position.z).sqrt()
    }

    pub fn set_auto_rotate(&mut self, active: bool) {
        self.auto_rotate.active = active;
    }

    pub fn change_rotate_direction(&mut self) {
        self.auto_rotate.direction = -self.auto_rotate.direction;
    }

    /// Set the orbit radius and move the camera onto it. Returns the clamped value.
    pub fn set_rotate_radius(&mut self, radius: f32) -> f32 {
        let radius = radius.clamp(*RADIUS_RANGE.start(), *RADIUS_RANGE.end());
        let distance = self.distance_to_y_axis();
        if distance > f32::EPSILON {
            self.position.x *= radius / distance;
            self.position.z *= radius / distance;
        }
        self.auto_rotate.radius = radius;
        radius
    }

    /// Set the orbit speed. Returns the clamped value.
    pub fn set_rotate_speed(&mut self, speed: f32) -> f32 {
        let speed = speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
        self.auto_rotate.speed = speed;
        speed
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.auto_rotate.radius = self
            .distance_to_y_axis()
            .clamp(*TRACKED_RADIUS.start(), *TRACKED_RADIUS.end());

        if self.auto_rotate.active {
            self.axis_align();
            self.look_at(Vec3::new(0.0, self.position.y, 0.0));
            let orbit = &mut self.auto_rotate;
            orbit.angle += orbit.direction * orbit.speed;
            self.position.x = orbit.radius * orbit.angle.cos();
            self.position.z = orbit.radius * orbit.angle.sin();
        }
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_home() {
        let mut cam = CameraRig::default();
        cam.position = Vec3::new(5.0, 5.0, 5.0);
        cam.up = Vec3::X;
        cam.target = Vec3::ONE;

        cam.reset();
        assert_eq!(cam.position, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(cam.target, Vec3::ZERO);
        assert_eq!(cam.up, Vec3::Y);
    }

    #[test]
    fn test_toggle_mode() {
        let mut cam = CameraRig::default();
        assert_eq!(cam.mode, CameraMode::Trackball);
        assert_eq!(cam.toggle_mode(), CameraMode::Fly);
        assert_eq!(cam.toggle_mode(), CameraMode::Trackball);
    }

    #[test]
    fn test_update_tracks_radius_without_moving() {
        let mut cam = CameraRig::default();
        cam.update();
        assert!((cam.auto_rotate.radius - 2.0).abs() < 1e-6);
        assert_eq!(cam.position, Vec3::new(0.0, 1.0, 2.0));

        cam.position = Vec3::new(0.0, 1.0, 0.1);
        cam.update();
        assert_eq!(cam.auto_rotate.radius, 0.5);
    }

    #[test]
    fn test_auto_rotate_orbits_at_constant_height() {
        let mut cam = CameraRig::default();
        cam.set_auto_rotate(true);

        cam.update();
        let expected_angle = -0.01_f32;
        assert!((cam.auto_rotate.angle - expected_angle).abs() < 1e-6);
        assert!((cam.position.x - 2.0 * expected_angle.cos()).abs() < 1e-5);
        assert!((cam.position.z - 2.0 * expected_angle.sin()).abs() < 1e-5);
        assert_eq!(cam.position.y, 1.0);
        assert_eq!(cam.target, Vec3::new(0.0, 1.0, 0.0));

        for _ in 0..100 {
            cam.update();
        }
        assert!((cam.distance_to_y_axis() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_change_direction() {
        let mut cam = CameraRig::default();
        cam.set_auto_rotate(true);
        cam.change_rotate_direction();
        cam.update();
        assert!(cam.auto_rotate.angle > 0.0);
    }

    #[test]
    fn test_set_rotate_radius_rescales_and_clamps() {
        let mut cam = CameraRig::default();
        assert_eq!(cam.set_rotate_radius(3.0), 3.0);
        assert!((cam.distance_to_y_axis() - 3.0).abs() < 1e-5);
        assert_eq!(cam.position.y, 1.0);

        assert_eq!(cam.set_rotate_radius(10.0), 3.0);
        assert_eq!(cam.set_rotate_radius(0.0), 1.0);
        assert!((cam.distance_to_y_axis() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_set_rotate_radius_on_axis_keeps_position() {
        let mut cam = CameraRig::default();
        cam.position = Vec3::new(0.0, 4.0, 0.0);
        cam.set_rotate_radius(2.0);
        assert_eq!(cam.position, Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(cam.auto_rotate.radius, 2.0);
    }

    #[test]
    fn test_set_rotate_speed_clamps() {
        let mut cam = CameraRig::default();
        assert_eq!(cam.set_rotate_speed(1.0), 0.01);
        assert_eq!(cam.set_rotate_speed(0.005), 0.005);
        assert_eq!(cam.set_rotate_speed(0.0), 0.001);
    }

    #[test]
    fn test_matrices_are_finite() {
        let cam = CameraRig::default();
        assert!(cam.view_matrix().is_finite());
        assert!(cam.projection_matrix(16.0 / 9.0).is_finite());
    }
}
