//! Procedural generator of test scenes for renderers.
//!
//! Scenes are assembled from tessellated shapes in a flat, name-keyed [Scene], converted to a
//! node graph ([GraphScene]) and written as OBJ/MTL and glTF files, alongside a set of
//! procedural textures and sky maps.
#![allow(clippy::too_many_arguments)]

pub mod batch;
pub mod config;
mod error;
pub mod geometry;
pub mod graph;
pub mod images;
pub mod materials;
pub mod presets;
pub mod scene;
pub mod shapes;
pub mod writer;

pub use batch::{run_batch, BatchReport, Job};
pub use config::{GeneratorConfig, Selection};
pub use error::{Error, InvariantError, Result, ValidationError};
pub use graph::{GraphScene, SceneConverter};
pub use presets::{Lighting, Preset, SceneKind};
pub use scene::Scene;
