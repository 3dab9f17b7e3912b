//! Viewer settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::camera::CameraMode;

/// Color tokens for the scene and default materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub background: String,
    /// Default box material color
    pub boxes: String,
    /// Default line material color
    pub lines: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background: "#cccccc".to_string(),
            boxes: "#ffffff".to_string(),
            lines: "#ff3333".to_string(),
        }
    }
}

/// Material opacity settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    /// Opacity of boxes without a color token
    pub box_opacity: f32,
    /// Opacity of boxes with their own color token
    pub colored_box_opacity: f32,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            box_opacity: 0.3,
            colored_box_opacity: 0.5,
        }
    }
}

/// Perspective camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view (degrees)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Position restored by "reset"
    pub home: [f32; 3],
    /// Control scheme on startup
    pub mode: CameraMode,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 70.0,
            near: 0.01,
            far: 100.0,
            home: [0.0, 1.0, 2.0],
            mode: CameraMode::Trackball,
        }
    }
}

/// Auto-orbit around the Y axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoRotateSettings {
    pub active: bool,
    /// +1 or -1
    pub direction: f32,
    pub radius: f32,
    /// Radians per frame
    pub speed: f32,
}

impl Default for AutoRotateSettings {
    fn default() -> Self {
        Self {
            active: false,
            direction: -1.0,
            radius: 5.0,
            speed: 0.01,
        }
    }
}

/// Static scene helpers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub fog_density: f32,
    pub axis_length: f32,
    pub grid_size: f32,
    pub grid_divisions: u32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            fog_density: 0.002,
            axis_length: 2.5,
            grid_size: 4.0,
            grid_divisions: 64,
        }
    }
}

/// Profiles loaded on startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialProfile {
    pub boxes: String,
    pub lines: String,
}

impl Default for InitialProfile {
    fn default() -> Self {
        Self {
            boxes: [
                "0.5|0,0,0|gray;0.5|0,0.5,0;0.5|0.5,0,0;0.5|0.5,0.5,0|gray",
                "0.25|0,0,0.5|gray;0.25|0,0.25,0.5;0.25|0.25,0,0.5;0.25|0.25,0.25,0.5|gray",
                "0.25|0.5,0,0.5|gray;0.25|0.5,0.25,0.5;0.25|0.75,0,0.5;0.25|0.75,0.25,0.5|gray",
                "0.25|0,0.5,0.5|gray;0.25|0,0.75,0.5;0.25|0.25,0.5,0.5;0.25|0.25,0.75,0.5|gray",
                "0.25|0.5,0.5,0.5|gray;0.25|0.5,0.75,0.5;0.25|0.75,0.5,0.5;0.25|0.75,0.75,0.5|gray",
            ]
            .join(";"),
            lines: [
                "0.25,0.25,0.25|0.25,0.25,-0.25|0.25,0.75,-0.25|0.25,0.75,0.25",
                "0.75,0.25,0.25|0.75,0.25,-0.25|0.75,0.75,-0.25|0.75,0.75,0.25",
            ]
            .join(";"),
        }
    }
}

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub colors: ColorSettings,
    pub materials: MaterialSettings,
    pub camera: CameraSettings,
    pub auto_rotate: AutoRotateSettings,
    pub scene: SceneSettings,
    pub initial: InitialProfile,
}

impl ViewerSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "boxview", "boxview")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the user config dir, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring settings file: {e}"),
                }
            }
        }
        Self::default()
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        serde_json::from_str(&json)
            .map_err(|e| format!("Failed to parse settings {}: {e}", path.display()))
    }

    /// Save settings to the user config dir, returning the file written
    pub fn save(&self) -> Result<PathBuf, String> {
        let path = Self::config_path().ok_or("No config directory for this user")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to an explicit file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write settings {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: ViewerSettings =
            serde_json::from_str(r#"{"colors": {"lines": "blue"}, "auto_rotate": {"active": true}}"#)
                .unwrap();
        assert_eq!(settings.colors.lines, "blue");
        assert_eq!(settings.colors.boxes, "#ffffff");
        assert!(settings.auto_rotate.active);
        assert_eq!(settings.auto_rotate.direction, -1.0);
        assert_eq!(settings.camera.mode, CameraMode::Trackball);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("boxview-settings-{}", uuid::Uuid::new_v4()));
        let path = dir.join("settings.json");

        let mut settings = ViewerSettings::default();
        settings.camera.mode = CameraMode::Fly;
        settings.initial.boxes = "1|0,0,0".to_string();
        settings.save_to(&path).unwrap();

        let loaded = ViewerSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = ViewerSettings::load_from(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.contains("Failed to read settings"));
    }

    #[test]
    fn test_default_initial_profile_is_well_formed() {
        let initial = InitialProfile::default();
        assert!(shared::parse_boxes(&initial.boxes).is_clean());
        assert_eq!(shared::parse_boxes(&initial.boxes).items.len(), 20);
        assert_eq!(shared::parse_lines(&initial.lines).items.len(), 2);
    }
}
