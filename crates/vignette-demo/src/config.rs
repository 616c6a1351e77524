use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use vignette_engine::coords::CameraConfig;

/// Demo settings; every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,

    /// Straight RGBA clear colour.
    pub background: [f32; 4],

    pub camera: CameraConfig,

    /// Directory holding the sprite images.
    pub assets: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            background: [0.612, 0.902, 0.949, 1.0],
            camera: CameraConfig::default(),
            assets: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kim Possible!".to_string(),
            width: 640,
            height: 480,
            resizable: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config '{}': {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config '{}': {source}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.camera.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "camera volume {:?} has an empty or non-finite extent",
                self.camera
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        if !self.background.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid("background colour must be finite".into()));
        }
        Ok(())
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.background.map(f64::from);
        wgpu::Color { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DemoConfig {
        serde_json::from_str(json).unwrap()
    }

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn defaults_match_the_stage() {
        let c = DemoConfig::default();
        assert_eq!(c.window.title, "Kim Possible!");
        assert_eq!((c.window.width, c.window.height), (640, 480));
        // The camera volume is fixed, so the window is too.
        assert!(!c.window.resizable);
        assert_eq!(c.background, [0.612, 0.902, 0.949, 1.0]);
        assert_eq!(c.camera, CameraConfig::default());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_object_is_all_defaults() {
        assert_eq!(parse("{}"), DemoConfig::default());
    }

    // ── overrides ─────────────────────────────────────────────────────────

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let c = parse(r#"{ "window": { "title": "Stage" }, "camera": { "left": -8.0, "right": 8.0 } }"#);
        assert_eq!(c.window.title, "Stage");
        assert_eq!(c.window.width, 640);
        assert!(!c.window.resizable);
        assert_eq!((c.camera.left, c.camera.right), (-8.0, 8.0));
        assert_eq!(c.camera.top, 3.75);
    }

    #[test]
    fn clear_color_widens_to_f64() {
        let c = parse(r#"{ "background": [0.0, 0.5, 1.0, 1.0] }"#);
        let col = c.clear_color();
        assert_eq!((col.r, col.g, col.b, col.a), (0.0, 0.5, 1.0, 1.0));
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn empty_camera_volume_is_rejected() {
        let c = parse(r#"{ "camera": { "bottom": 2.0, "top": 2.0 } }"#);
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_window_is_rejected() {
        let c = parse(r#"{ "window": { "width": 0 } }"#);
        assert!(c.validate().is_err());
    }

    // ── files ─────────────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_io_error() {
        let err = DemoConfig::load(Path::new("no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("no/such/config.json"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("vignette-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ \"window\": ").unwrap();
        let err = DemoConfig::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
