use super::objects::{add_point, add_quad, at};
use super::Lighting;
use crate::error::Result;
use crate::geometry::{lookat_light_frame, ColorRGB, Placement};
use crate::materials::Material;
use crate::scene::Scene;
use cgmath::{Point3, Vector3};

/// Two area lights on the front sides, aimed slightly above the origin.
fn add_area_lights(scene: &mut Scene) -> Result<()> {
    let material = scene.add_preset_material("arealight")?;
    let quad = add_quad(scene, "arealight", Some(material), 0, 2.0)?;
    let target = Point3::new(0.0, 2.0, 0.0);
    for (name, x) in [("arealight01", -4.0), ("arealight02", 4.0)] {
        let frame = lookat_light_frame(Point3::new(x, 4.0, 8.0), target, Vector3::unit_y());
        scene.add_instance(name, quad, Placement::Matrix(frame));
    }
    Ok(())
}

/// Sky map surrounding the scene.
fn add_env_light(scene: &mut Scene) {
    let texture = scene.add_texture("env.hdr");
    let material = scene.add_material(
        "envlight",
        Material::emission(ColorRGB::gray(1.0), Some(texture)),
    );
    scene.add_environment("envlight", material, None);
}

/// Adds the lights used by simple, material ball and rigid body scenes.
pub(super) fn add_lights(scene: &mut Scene, lighting: Lighting) -> Result<()> {
    match lighting {
        Lighting::Point => {
            let material = scene.add_preset_material("pointlight")?;
            for (name, x) in [("pointlight01", 1.4), ("pointlight02", -1.4)] {
                let point = add_point(scene, name, Some(material))?;
                scene.add_instance(name, point, at(x, 8.0, 6.0));
            }
        }
        Lighting::Area => add_area_lights(scene)?,
        Lighting::Env => add_env_light(scene),
    }
    Ok(())
}

/// Adds the lights of the large instancing scenes: point lights are brighter and farther away.
pub(super) fn add_wide_lights(scene: &mut Scene, lighting: Lighting) -> Result<()> {
    match lighting {
        Lighting::Point => {
            let lights = [
                ("pointlight01", 10000.0, [0.0, 50.0, 50.0]),
                ("pointlight02", 4000.0, [50.0, 50.0, 0.0]),
                ("pointlight03", 4000.0, [0.0, 50.0, -50.0]),
            ];
            for (name, intensity, [x, y, z]) in lights {
                let material =
                    scene.add_material(name, Material::emission(ColorRGB::gray(intensity), None));
                let point = add_point(scene, name, Some(material))?;
                scene.add_instance(name, point, at(x, y, z));
            }
        }
        Lighting::Area => add_area_lights(scene)?,
        Lighting::Env => add_env_light(scene),
    }
    Ok(())
}
