use crate::presets::Preset;
use std::path::PathBuf;

/// Strands used as clumping attractors by the fiber generator.
pub const GUIDE_STRANDS: usize = 128;
/// Near clip plane of converted cameras.
pub const CAMERA_NEAR: f32 = 0.1;
/// Far clip plane of converted cameras.
pub const CAMERA_FAR: f32 = 10000.0;
/// Side of the generated square textures, in pixels.
pub const TEXTURE_SIZE: u32 = 512;
pub const ENVMAP_WIDTH: u32 = 1024;
pub const ENVMAP_HEIGHT: u32 = 512;
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Which presets a batch generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    Only(Preset),
}

impl Selection {
    /// Parses a preset name, with `all` selecting every preset.
    pub fn parse(name: &str) -> Result<Self, crate::ValidationError> {
        if name == "all" {
            Ok(Selection::All)
        } else {
            name.parse().map(Selection::Only)
        }
    }

    /// Returns the selected presets, in generation order.
    pub fn presets(&self) -> Vec<Preset> {
        match self {
            Selection::All => Preset::all(),
            Selection::Only(preset) => vec![*preset],
        }
    }
}

/// Settings of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory receiving every output file. Created if missing.
    pub output_dir: PathBuf,
    /// Run jobs on a worker pool instead of the calling thread.
    pub parallel: bool,
    pub selection: Selection,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_dir: PathBuf::from("tests"),
            parallel: true,
            selection: Selection::All,
        }
    }
}
