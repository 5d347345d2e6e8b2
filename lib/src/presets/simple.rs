use super::lights::add_lights;
use super::objects::{
    add_camera, add_cube, add_default_floor, add_fibers, add_hair, add_objects, add_points,
    add_quad, add_sphere, at, at_rotated,
};
use super::Lighting;
use crate::error::Result;
use crate::geometry::{ColorRGB, Placement};
use crate::materials::Material;
use crate::scene::{Handle, Scene};
use crate::shapes::{FiberParams, HairParams};

const POINT_COUNT: usize = 64 * 64 * 16;
const STRAND_COUNT: usize = 64 * 64 * 16;

/// Object setups of the simple scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    Basic,
    Simple,
    Transparent,
    TransparentPlanes,
    Refracted,
    RefractedPlanes,
    Lines,
    Points,
    Hair,
    SymPoints01,
    SymPoints02,
    SymCloth01,
    SymCloth02,
}

impl SimpleKind {
    pub const ALL: [SimpleKind; 13] = [
        SimpleKind::Basic,
        SimpleKind::Simple,
        SimpleKind::Transparent,
        SimpleKind::TransparentPlanes,
        SimpleKind::Refracted,
        SimpleKind::RefractedPlanes,
        SimpleKind::Lines,
        SimpleKind::Points,
        SimpleKind::Hair,
        SimpleKind::SymPoints01,
        SimpleKind::SymPoints02,
        SimpleKind::SymCloth01,
        SimpleKind::SymCloth02,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SimpleKind::Basic => "basic",
            SimpleKind::Simple => "simple",
            SimpleKind::Transparent => "transparent",
            SimpleKind::TransparentPlanes => "transparentp",
            SimpleKind::Refracted => "refracted",
            SimpleKind::RefractedPlanes => "refractedp",
            SimpleKind::Lines => "lines",
            SimpleKind::Points => "points",
            SimpleKind::Hair => "hair",
            SimpleKind::SymPoints01 => "sym_points01",
            SimpleKind::SymPoints02 => "sym_points02",
            SimpleKind::SymCloth01 => "sym_cloth01",
            SimpleKind::SymCloth02 => "sym_cloth02",
        }
    }
}

const TEXTURES: [&str; 3] = ["rcolored.png", "checker.png", "colored.png"];

/// Textured, white plastic for each of the three objects.
fn textured_plastics(scene: &mut Scene, opacity: Option<[f32; 3]>) -> [Handle<Material>; 3] {
    let roughness = [0.1, 0.05, 0.01];
    let mut materials = Vec::with_capacity(3);
    for (i, name) in ["obj01", "obj02", "obj03"].iter().enumerate() {
        let texture = Some(scene.add_texture(TEXTURES[i]));
        let white = ColorRGB::gray(1.0);
        let material = match opacity {
            Some(op) => Material::transparent_plastic(white, roughness[i], op[i], texture),
            None => Material::plastic(white, roughness[i], texture),
        };
        materials.push(scene.add_material(name, material));
    }
    [materials[0], materials[1], materials[2]]
}

fn glasses(scene: &mut Scene, roughness: [f32; 3]) -> [Handle<Material>; 3] {
    let white = ColorRGB::gray(1.0);
    [
        scene.add_material("obj01", Material::glass(white, roughness[0], None)),
        scene.add_material("obj02", Material::glass(white, roughness[1], None)),
        scene.add_material("obj03", Material::glass(white, roughness[2], None)),
    ]
}

/// Three quads side by side, named `{prefix}01` to `{prefix}03`.
fn add_planes(
    scene: &mut Scene,
    prefix: &str,
    materials: [Handle<Material>; 3],
    level: u32,
    placements: [Placement; 3],
) -> Result<()> {
    for i in 0..3 {
        let name = format!("{prefix}{:02}", i + 1);
        let quad = add_quad(scene, &name, Some(materials[i]), level, 1.0)?;
        scene.add_instance(&name, quad, placements[i]);
    }
    Ok(())
}

fn side_by_side(y: f32) -> [Placement; 3] {
    [at(-2.5, y, 0.0), at(0.0, y, 0.0), at(2.5, y, 0.0)]
}

fn add_point_clouds(scene: &mut Scene, material: Handle<Material>, y: f32) -> Result<()> {
    for (i, placement) in side_by_side(y).into_iter().enumerate() {
        let name = format!("points{:02}", i + 1);
        let points = add_points(scene, &name, Some(material), POINT_COUNT, 1)?;
        scene.add_instance(&name, points, placement);
    }
    Ok(())
}

pub(super) fn build(scene: &mut Scene, kind: SimpleKind, lighting: Lighting) -> Result<()> {
    add_camera(scene, "cam", [0.0, 3.0, 10.0], 0.5, 0.0);
    add_camera(scene, "cam_dof", [0.0, 3.0, 10.0], 0.5, 0.1);
    add_default_floor(scene)?;
    match kind {
        SimpleKind::Basic => {
            let colored = [
                ("obj01", ColorRGB::new(0.5, 0.2, 0.2), 0.1),
                ("obj02", ColorRGB::new(0.2, 0.5, 0.2), 0.05),
                ("obj03", ColorRGB::new(0.2, 0.2, 0.5), 0.01),
            ];
            let materials =
                colored.map(|(name, c, r)| scene.add_material(name, Material::plastic(c, r, None)));
            add_objects(scene, materials)?;
        }
        SimpleKind::Simple => {
            let materials = textured_plastics(scene, None);
            add_objects(scene, materials)?;
        }
        SimpleKind::Transparent => {
            let materials = textured_plastics(scene, Some([0.1, 0.5, 0.9]));
            add_objects(scene, materials)?;
        }
        SimpleKind::TransparentPlanes => {
            let materials = textured_plastics(scene, Some([0.1, 0.5, 0.9]));
            add_planes(scene, "plane", materials, 2, side_by_side(0.0))?;
        }
        SimpleKind::Refracted => {
            let [m1, m2, m3] = glasses(scene, [0.1, 0.05, 0.01]);
            let quad = add_quad(scene, "obj01", Some(m1), 2, 1.0)?;
            let cube = add_cube(scene, "obj02", Some(m2), 2)?;
            let sphere = add_sphere(scene, "obj03", Some(m3), 5, 1.0)?;
            scene.add_instance("obj01", quad, at(-2.5, 0.0, 0.0));
            scene.add_instance("obj02", cube, Placement::identity());
            scene.add_instance("obj03", sphere, at(2.5, 0.0, 0.0));
        }
        SimpleKind::RefractedPlanes => {
            let materials = glasses(scene, [0.05, 0.02, 0.01]);
            add_planes(scene, "obj", materials, 2, side_by_side(0.0))?;
        }
        SimpleKind::Points => {
            let gray = Material::diffuse(ColorRGB::gray(0.2), None);
            let material = scene.add_material("points", gray);
            let points = add_points(scene, "points01", Some(material), POINT_COUNT, 1)?;
            scene.add_instance("points01", points, Placement::identity());
        }
        SimpleKind::Lines => {
            let gray = Material::diffuse(ColorRGB::gray(0.2), None);
            let material = scene.add_material("lines", gray.clone());
            let interior = scene.add_material("interior", gray);
            let shaping = [
                FiberParams {
                    jitter: 0.1,
                    ..Default::default()
                },
                FiberParams {
                    clump: 0.75,
                    ..Default::default()
                },
                FiberParams {
                    twist: 0.5,
                    ..Default::default()
                },
            ];
            for (i, (params, placement)) in shaping.iter().zip(side_by_side(0.0)).enumerate() {
                let params = FiberParams {
                    strands: STRAND_COUNT,
                    segments: 4,
                    ..*params
                };
                let name = format!("lines{:02}", i + 1);
                let lines = add_fibers(scene, &name, Some(material), &params)?;
                scene.add_instance(&format!("lines_{:02}", i + 1), lines, placement);
                let name = format!("lines_interior_{:02}", i + 1);
                let sphere = add_sphere(scene, &name, Some(interior), 6, 1.0)?;
                scene.add_instance(&name, sphere, placement);
            }
        }
        SimpleKind::Hair => {
            let gray = Material::diffuse(ColorRGB::gray(0.2), None);
            let material = scene.add_material("lines", gray.clone());
            let interior = scene.add_material("interior", gray);
            let objects = add_objects(scene, [interior; 3])?;
            let params = HairParams {
                strands: 1 << 14,
                segments: 1 << 4,
                length: 0.1,
            };
            for (object, seed) in objects.into_iter().zip([13, 17, 23]) {
                add_hair(scene, object, &params, seed, material)?;
            }
        }
        SimpleKind::SymPoints01 => {
            let material = scene.add_preset_material("sym_points")?;
            add_point_clouds(scene, material, 0.0)?;
        }
        SimpleKind::SymPoints02 => {
            let material = scene.add_preset_material("sym_points")?;
            let plastic = scene.add_preset_material("plastic01")?;
            add_objects(scene, [plastic; 3])?;
            add_point_clouds(scene, material, 3.0)?;
        }
        SimpleKind::SymCloth01 => {
            let material = scene.add_preset_material("sym_cloth")?;
            add_planes(scene, "sym_quad", [material; 3], 6, side_by_side(0.0))?;
        }
        SimpleKind::SymCloth02 => {
            let material = scene.add_preset_material("sym_cloth")?;
            let plastic = scene.add_preset_material("plastic01")?;
            add_objects(scene, [plastic; 3])?;
            let hanging = [
                at_rotated([-2.5, 3.0, 0.0], [-90.0, 0.0, 0.0]),
                at_rotated([0.0, 3.0, 0.1], [-90.0, 0.0, 0.0]),
                at_rotated([2.5, 3.0, 0.15], [-90.0, 0.0, 0.0]),
            ];
            add_planes(scene, "sym_quad", [material; 3], 6, hanging)?;
        }
    }
    add_lights(scene, lighting)
}

#[cfg(test)]
mod tests {
    use super::{build, SimpleKind};
    use crate::materials::MaterialKind;
    use crate::presets::Lighting;
    use crate::scene::Scene;

    #[test]
    fn basic_scene() {
        let mut scene = Scene::new();
        build(&mut scene, SimpleKind::Basic, Lighting::Area).unwrap();
        assert_eq!(scene.cameras.len(), 2);
        // floor, three objects, two area lights
        assert_eq!(scene.instances.len(), 6);
        // floor, three objects, one shared light quad
        assert_eq!(scene.meshes.len(), 5);
        let names = scene.instances.iter().map(|(_, n, _)| n).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["floor", "obj01", "obj02", "obj03", "arealight01", "arealight02"]
        );
    }

    #[test]
    fn cloth_quads_are_distinct() {
        let mut scene = Scene::new();
        build(&mut scene, SimpleKind::SymCloth02, Lighting::Point).unwrap();
        for name in ["sym_quad01", "sym_quad02", "sym_quad03"] {
            assert!(scene.instances.find(name).is_some(), "{name}");
            assert!(scene.meshes.find(name).is_some(), "{name}");
        }
    }

    #[test]
    fn refracted_uses_glass() {
        let mut scene = Scene::new();
        build(&mut scene, SimpleKind::RefractedPlanes, Lighting::Env).unwrap();
        let glass = scene
            .materials
            .iter()
            .filter(|(_, _, m)| m.kind == Some(MaterialKind::Glass))
            .count();
        assert_eq!(glass, 3);
        assert_eq!(scene.environments.len(), 1);
        assert!(scene.instances.find("obj02").is_some());
    }
}
