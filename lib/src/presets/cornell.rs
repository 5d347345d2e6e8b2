use super::objects::{add_box, add_camera_towards, add_quad, at_rotated};
use crate::error::Result;
use crate::geometry::ColorRGB;
use crate::materials::Material;
use crate::scene::Scene;
use cgmath::Vector3;

/// The Cornell box, with the measured colors of the reference scene.
pub(super) fn build(scene: &mut Scene) -> Result<()> {
    add_camera_towards(scene, "cb_cam", [0.0, 1.0, 4.0], [0.0, 1.0, 0.0], 0.7, 0.0, 1.0);
    let white = scene.add_material(
        "cb_white",
        Material::diffuse(ColorRGB::new(0.725, 0.71, 0.68), None),
    );
    let red = scene.add_material(
        "cb_red",
        Material::diffuse(ColorRGB::new(0.63, 0.065, 0.05), None),
    );
    let green = scene.add_material(
        "cb_green",
        Material::diffuse(ColorRGB::new(0.14, 0.45, 0.091), None),
    );
    let light = scene.add_material(
        "cb_light",
        Material::emission(ColorRGB::new(17.0, 12.0, 4.0), None),
    );
    let walls = [
        ("cb_floor", white, [0.0, 0.0, 0.0], [-90.0, 0.0, 0.0]),
        ("cb_ceiling", white, [0.0, 2.0, 0.0], [90.0, 0.0, 0.0]),
        ("cb_back", white, [0.0, 1.0, -1.0], [0.0, 0.0, 0.0]),
        ("cb_right", green, [1.0, 1.0, 0.0], [0.0, -90.0, 0.0]),
        ("cb_left", red, [-1.0, 1.0, 0.0], [0.0, 90.0, 0.0]),
    ];
    for (name, material, position, rotation) in walls {
        let quad = add_quad(scene, name, Some(material), 0, 1.0)?;
        scene.add_instance(name, quad, at_rotated(position, rotation));
    }
    let boxes = [
        ("cb_tallbox", [0.3, 0.6, 0.3], [-0.33, 0.6, -0.29], 15.0),
        ("cb_shortbox", [0.3, 0.3, 0.3], [0.33, 0.3, 0.33], -15.0),
    ];
    for (name, size, position, angle) in boxes {
        let mesh = add_box(scene, name, Some(white), 0, Vector3::from(size))?;
        scene.add_instance(name, mesh, at_rotated(position, [0.0, angle, 0.0]));
    }
    let quad = add_quad(scene, "cb_light", Some(light), 0, 0.25)?;
    scene.add_instance("cb_light", quad, at_rotated([0.0, 1.999, 0.0], [90.0, 0.0, 0.0]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::scene::Scene;
    use cgmath::{Point3, Transform};
    use float_cmp::assert_approx_eq;

    #[test]
    fn walls_enclose_the_box() {
        let mut scene = Scene::new();
        build(&mut scene).unwrap();
        assert_eq!(scene.instances.len(), 8);
        assert_eq!(scene.meshes.len(), 8);
        assert_eq!(scene.materials.len(), 4);
        assert_eq!(scene.cameras.len(), 1);
        let side = |name: &str| {
            let handle = scene.instances.find(name).unwrap();
            let m = scene.instances.get(handle).unwrap().placement.to_matrix();
            m.transform_point(Point3::new(0.0, 0.0, 0.0))
        };
        assert_approx_eq!(f32, side("cb_left").x, -1.0);
        assert_approx_eq!(f32, side("cb_right").x, 1.0);
        assert_approx_eq!(f32, side("cb_ceiling").y, 2.0);
    }

    #[test]
    fn flattened_walls_face_inwards() {
        let mut scene = Scene::new();
        build(&mut scene).unwrap();
        scene.flatten_instances().unwrap();
        let handle = scene.meshes.find("cb_left").unwrap();
        let shape = &scene.meshes.get(handle).unwrap().parts[0].shape;
        for n in &shape.vertices.norm {
            assert_approx_eq!(f32, n.x, 1.0, epsilon = 1e-5);
        }
    }
}
