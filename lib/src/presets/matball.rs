use super::lights::add_lights;
use super::objects::{
    add_camera_towards, add_default_floor, add_hollow_cut_sphere, add_sphere, at_rotated,
};
use super::Lighting;
use crate::error::Result;
use crate::geometry::Placement;
use crate::scene::Scene;

/// Material presets showcased on the material ball.
pub const MATBALL_MATERIALS: [&str; 20] = [
    "matte00",
    "matte01_txt",
    "plastic01",
    "plastic02",
    "plastic03",
    "plastic04",
    "plastic01_txt",
    "plastic02_txt",
    "plastic03_txt",
    "plastic04_txt",
    "gold01",
    "gold02",
    "copper01",
    "copper02",
    "silver01",
    "silver02",
    "bump00",
    "bump01",
    "bump02",
    "bump03",
];

/// Outer shell of the material ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatballShape {
    /// Shell cut open, showing the inner sphere.
    Open,
    /// Cut shell whose opening is closed by a flat cap.
    Capped,
}

/// Material ball: a matte inner sphere wrapped in a tilted, cut shell made of `material`.
pub(super) fn build(
    scene: &mut Scene,
    material: &str,
    shape: MatballShape,
    lighting: Lighting,
) -> Result<()> {
    let origin = [0.0; 3];
    add_camera_towards(scene, "cam_close", [0.0, 5.0, 10.0], origin, 0.25, 0.0, 1.0);
    add_camera_towards(scene, "cam_close_low", [0.0, 3.0, 10.0], origin, 0.25, 0.0, 1.0);
    add_default_floor(scene)?;
    let shell_material = scene.add_preset_material(material)?;
    let inner_material = scene.add_preset_material("matte00")?;
    let inner = add_sphere(scene, "intmatball", Some(inner_material), 5, 0.8)?;
    scene.add_instance("intmatball", inner, Placement::identity());
    let capped = shape == MatballShape::Capped;
    let shell = add_hollow_cut_sphere(scene, "matball", Some(shell_material), 5, capped)?;
    scene.add_instance("matball", shell, at_rotated(origin, [0.0, 35.0, 45.0]));
    add_lights(scene, lighting)
}
