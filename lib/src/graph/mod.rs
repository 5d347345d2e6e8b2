//! Hierarchical scene and its conversion from the flat representation.
#[allow(clippy::module_inception)]
mod scene;
pub use self::scene::{
    GraphCamera, GraphMaterial, GraphMesh, GraphScene, MetallicRoughness, Node, Primitive,
};
mod camera;
pub use self::camera::{DefaultCameraPolicy, FramingCamera, PlacedCamera};
mod convert;
pub use self::convert::SceneConverter;
