use std::{fs, path::Path};

use anyhow::Context;
use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Which of the bundled scenes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum SceneKind {
    /// Fifteen spheres pulled hard toward the origin, smoothed pointer.
    #[default]
    Spheres,
    /// Six colored metaballs with a gentle pull and a snapping pointer.
    Metaballs,
}

impl SceneKind {
    pub const ALL: [SceneKind; 2] = [SceneKind::Spheres, SceneKind::Metaballs];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Spheres => "spheres",
            SceneKind::Metaballs => "metaballs",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SceneKind::Spheres => "15 spheres, strong radial pull, eased pointer",
            SceneKind::Metaballs => "6 colored metaballs, weak radial pull, snapping pointer",
        }
    }

    pub fn preset(self) -> SceneConfig {
        match self {
            SceneKind::Spheres => SceneConfig::spheres(),
            SceneKind::Metaballs => SceneConfig::metaballs(),
        }
    }

    /// Conventional on-disk override file for this scene.
    pub fn config_path(self) -> String {
        format!("assets/config/{}.ron", self.name())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Field Scenes".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 20.0],
            fov_degrees: 35.0,
            near: 1.0,
            far: 40.0,
        }
    }
}
impl CameraConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 2.0, 0.0],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub enabled: bool,
    /// Impulse per second along the normalized position; negative pulls inward.
    pub strength: f32,
}
impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: -400.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BodySetConfig {
    /// Number of bodies when `positions` is empty.
    pub count: usize,
    /// Edge length of the cube (centered on the origin) random positions are drawn from.
    pub spread: f32,
    /// Explicit initial positions; overrides `count`/`spread` when non-empty.
    pub positions: Vec<[f32; 3]>,
    /// sRGB tints, cycled across bodies. Empty means white.
    pub colors: Vec<[f32; 3]>,
    pub collider_radius: f32,
    pub visual_radius: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub seed: Option<u64>,
}
impl Default for BodySetConfig {
    fn default() -> Self {
        Self {
            count: 15,
            spread: 10.0,
            positions: Vec::new(),
            colors: Vec::new(),
            collider_radius: 1.0,
            visual_radius: 1.0,
            linear_damping: 0.65,
            angular_damping: 0.95,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
    pub enabled: bool,
    /// Smoothing time constant in seconds; 0 snaps straight to the target.
    pub smoothing_time: f32,
    /// Use the critically damped spring instead of plain exponential decay.
    pub critically_damped: bool,
    /// Upper bound on pointer body speed (world units / second). `None` is unbounded.
    pub max_speed: Option<f32>,
    pub collider_radius: f32,
    pub visual_radius: f32,
    pub color: [f32; 3],
}
impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smoothing_time: 0.1,
            critically_damped: false,
            max_speed: None,
            collider_radius: 1.0,
            visual_radius: 1.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_brightness: f32,
    pub key_illuminance: f32,
    /// Secondary light shining from `rim_position` toward the origin. 0 disables it.
    pub rim_illuminance: f32,
    pub rim_color: [f32; 3],
    pub rim_position: [f32; 3],
}
impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 600.0,
            key_illuminance: 4_000.0,
            rim_illuminance: 0.0,
            rim_color: [1.0, 1.0, 1.0],
            rim_position: [-10.0, -10.0, -10.0],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Seconds between field stats log lines.
    pub log_interval: f32,
    pub rapier_debug: bool,
}
impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_interval: 2.0,
            rapier_debug: false,
        }
    }
}

/// Full description of one scene. `Default` is the spheres scene.
#[derive(Debug, Deserialize, Serialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub physics: PhysicsConfig,
    pub field: FieldConfig,
    pub bodies: BodySetConfig,
    pub pointer: PointerConfig,
    pub lighting: LightingConfig,
    pub debug: DebugConfig,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            camera: Default::default(),
            physics: Default::default(),
            field: Default::default(),
            bodies: Default::default(),
            pointer: Default::default(),
            lighting: Default::default(),
            debug: Default::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a single RON file. Keys it omits take the section defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read scene config {}", path.display()))?;
        ron::from_str(&data).with_context(|| format!("parse RON {}", path.display()))
    }

    /// Merge RON overlays on top of `base`, key by key. Unreadable or unparsable
    /// files are skipped and reported. Returns (config, used paths, errors).
    pub fn load_layered<P, I>(base: SceneConfig, paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        let base_value = ron::to_string(&base)
            .map_err(|e| e.to_string())
            .and_then(|txt| ron::from_str::<Value>(&txt).map_err(|e| e.to_string()));
        let mut merged = match base_value {
            Ok(v) => v,
            Err(e) => {
                errors.push(format!("failed to encode base config; overlays skipped: {e}"));
                return (base, used, errors);
            }
        };
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        merge_value(&mut merged, val);
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged.into_rust::<SceneConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using base: {e}"
                ));
                (base, used, errors)
            }
        }
    }

    /// Number of field bodies this config spawns.
    pub fn body_count(&self) -> usize {
        if self.bodies.positions.is_empty() {
            self.bodies.count
        } else {
            self.bodies.positions.len()
        }
    }

    /// Initial body positions. Explicit positions win; otherwise each axis is drawn
    /// uniformly from `[-spread/2, spread/2]`, reproducibly when `seed` is set.
    pub fn body_positions(&self) -> Vec<Vec3> {
        let b = &self.bodies;
        if !b.positions.is_empty() {
            return b.positions.iter().copied().map(Vec3::from_array).collect();
        }
        let mut rng = match b.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let half = if b.spread.is_finite() { b.spread.max(0.0) * 0.5 } else { 0.0 };
        (0..b.count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                )
            })
            .collect()
    }

    /// sRGB tint for body `index`, cycling through `colors`.
    pub fn body_color(&self, index: usize) -> [f32; 3] {
        let colors = &self.bodies.colors;
        if colors.is_empty() {
            [1.0, 1.0, 1.0]
        } else {
            colors[index % colors.len()]
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            w.push(format!("camera.fov_degrees {} outside (0, 180)", cam.fov_degrees));
        }
        if cam.near <= 0.0 || cam.near >= cam.far {
            w.push(format!(
                "camera near/far invalid ({} / {}); need 0 < near < far",
                cam.near, cam.far
            ));
        }
        if cam.position().length_squared() < 1e-6 {
            w.push("camera.position at origin; viewport extents collapse to zero".into());
        }
        if self.physics.gravity.iter().any(|g| !g.is_finite()) {
            w.push("physics.gravity must be finite".into());
        }
        if self.field.enabled {
            let s = self.field.strength;
            if !s.is_finite() {
                w.push("field.strength must be finite".into());
            } else if s.abs() < 1e-9 {
                w.push("field.strength is zero; field has no effect".into());
            } else if s > 0.0 {
                w.push(format!(
                    "field.strength {s} positive -> bodies pushed away from origin"
                ));
            }
        }
        let b = &self.bodies;
        let count = self.body_count();
        if count == 0 {
            w.push("bodies: nothing will spawn (count 0 and no positions)".into());
        }
        if count > 10_000 {
            w.push(format!("bodies: {count} very high; performance may suffer"));
        }
        if b.positions.is_empty() {
            if !b.spread.is_finite() {
                w.push(format!("bodies.spread {} not finite -> treated as 0", b.spread));
            } else if b.spread < 0.0 {
                w.push(format!("bodies.spread {} negative -> treated as 0", b.spread));
            }
        }
        if b.positions
            .iter()
            .any(|p| Vec3::from_array(*p).length_squared() < 1e-12)
        {
            w.push("bodies.positions contains the origin; field cannot act on it".into());
        }
        if !b.colors.is_empty() && b.colors.len() < count {
            w.push(format!(
                "bodies.colors has {} entries for {count} bodies; colors repeat",
                b.colors.len()
            ));
        }
        if b.collider_radius <= 0.0 {
            w.push("bodies.collider_radius must be > 0".into());
        }
        if b.visual_radius <= 0.0 {
            w.push("bodies.visual_radius must be > 0".into());
        }
        if b.linear_damping < 0.0 || b.angular_damping < 0.0 {
            w.push("bodies damping must be >= 0".into());
        }
        let p = &self.pointer;
        if p.enabled {
            if p.smoothing_time < 0.0 {
                w.push(format!(
                    "pointer.smoothing_time {} negative -> treated as 0 (snap)",
                    p.smoothing_time
                ));
            }
            if let Some(max) = p.max_speed {
                if max <= 0.0 {
                    w.push(format!("pointer.max_speed {max} must be > 0 (pointer cannot move)"));
                }
            }
            if p.collider_radius <= 0.0 {
                w.push("pointer.collider_radius must be > 0".into());
            }
        }
        if self.debug.log_interval <= 0.0 {
            w.push("debug.log_interval must be > 0".into());
        }
        w
    }
}
