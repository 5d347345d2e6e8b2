//! Flat scene representation and the operations used by presets to assemble it.
mod library;
pub use self::library::{Handle, Library};
mod camera;
pub use self::camera::Camera;
#[allow(clippy::module_inception)]
mod scene;
pub use self::scene::{Environment, Instance, Mesh, MeshPart, Scene};
