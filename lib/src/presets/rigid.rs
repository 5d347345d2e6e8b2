use super::lights::add_lights;
use super::objects::{add_box, add_camera, add_cube, add_sphere_cube, at_rotated};
use super::Lighting;
use crate::error::Result;
use crate::geometry::ColorRGB;
use crate::materials::Material;
use crate::scene::Scene;
use cgmath::Vector3;

/// Arrangement of the rigid body test scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigidLayout {
    /// Objects stacked at increasing heights over a flat floor.
    Flat,
    /// Tilted objects over a floor slanted by 30 degrees.
    Slanted,
}

impl RigidLayout {
    pub const ALL: [RigidLayout; 2] = [RigidLayout::Flat, RigidLayout::Slanted];

    pub fn name(&self) -> &'static str {
        match self {
            RigidLayout::Flat => "flat",
            RigidLayout::Slanted => "slanted",
        }
    }

    fn floor(&self) -> ([f32; 3], [f32; 3]) {
        match self {
            RigidLayout::Flat => ([0.0, -1.0, 0.0], [0.0; 3]),
            RigidLayout::Slanted => ([0.0, -3.0, 0.0], [30.0, 0.0, 0.0]),
        }
    }

    /// Heights of the left, middle and right object of a row at depth `z`.
    fn heights(&self, z: f32) -> [f32; 3] {
        match self {
            RigidLayout::Flat => [0.5, 1.0, 1.5],
            RigidLayout::Slanted if z < 0.0 => [2.5; 3],
            RigidLayout::Slanted => [1.0; 3],
        }
    }

    /// Rotation of the left cube of each row.
    fn tilt(&self) -> [f32; 3] {
        match self {
            RigidLayout::Flat => [0.0; 3],
            RigidLayout::Slanted => [0.0, 0.0, 45.0],
        }
    }
}

pub(super) fn build(scene: &mut Scene, layout: RigidLayout) -> Result<()> {
    add_camera(scene, "cam", [10.0, 10.0, 10.0], 0.5, 0.0);
    add_camera(scene, "cam_dof", [10.0, 10.0, 10.0], 0.5, 0.1);
    let white = Material::diffuse(ColorRGB::gray(1.0), None);
    let floor_material = scene.add_material("floor", white);
    let checker = scene.add_texture("checker.png");
    let material = scene.add_material(
        "obj",
        Material::plastic(ColorRGB::gray(1.0), 0.1, Some(checker)),
    );
    let floor = add_box(
        scene,
        "floor",
        Some(floor_material),
        6,
        Vector3::new(12.0, 1.0, 12.0),
    )?;
    let (position, rotation) = layout.floor();
    scene.add_instance("floor", floor, at_rotated(position, rotation));
    for (row, z) in [(0, 0.0), (1, 3.0), (2, -3.0)] {
        let [left, middle, right] = layout.heights(z);
        let names = [1, 2, 3].map(|col| format!("obj{row}{col}"));
        let cube = add_cube(scene, &names[0], Some(material), 4)?;
        scene.add_instance(&names[0], cube, at_rotated([-2.5, left, z], layout.tilt()));
        let rounded = add_sphere_cube(scene, &names[1], Some(material), 4)?;
        scene.add_instance(&names[1], rounded, at_rotated([0.0, middle, z], [0.0; 3]));
        let cube = add_cube(scene, &names[2], Some(material), 4)?;
        scene.add_instance(&names[2], cube, at_rotated([2.5, right, z], [0.0; 3]));
    }
    add_lights(scene, Lighting::Point)
}
