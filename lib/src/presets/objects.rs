use crate::config::DEFAULT_ASPECT;
use crate::error::{InvariantError, Result};
use crate::geometry::{Placement, Shape};
use crate::materials::Material;
use crate::scene::{Camera, Handle, Instance, Mesh, MeshPart, Scene};
use crate::shapes::{
    cube, fibers, flipcap_sphere, floor, hair, hollow_cut_sphere, hollow_cut_sphere_capped, quad,
    random_points, single_point, sphere_cube, spherized_cube, uv_sphere, FiberParams, FloorParams,
    HairParams,
};
use cgmath::{Matrix4, Point3, Vector3};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

type MaterialRef = Option<Handle<Material>>;

fn steps(level: u32) -> usize {
    1 << level
}

/// Adds a mesh tessellated by `f`, uniformly scaled by `scale`.
fn add_scaled(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    scale: f32,
    f: impl FnOnce() -> Result<Shape, InvariantError>,
) -> Result<Handle<Mesh>> {
    let mesh = scene.add_shape(name, material, || {
        let mut shape = f()?;
        if scale != 1.0 {
            shape.scale(scale);
        }
        Ok::<_, InvariantError>(shape)
    })?;
    Ok(mesh)
}

pub(super) fn add_quad(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    level: u32,
    scale: f32,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, scale, || {
        quad(steps(level), steps(level))
    })
}

pub(super) fn add_cube(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    level: u32,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, 1.0, || {
        cube(steps(level), steps(level))
    })
}

/// Cube stretched by a different amount along each axis.
pub(super) fn add_box(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    level: u32,
    scale: Vector3<f32>,
) -> Result<Handle<Mesh>> {
    let mesh = scene.add_shape(name, material, || {
        let mut shape = cube(steps(level), steps(level))?;
        shape.transform(&Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z));
        Ok::<_, InvariantError>(shape)
    })?;
    Ok(mesh)
}

pub(super) fn add_sphere(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    level: u32,
    scale: f32,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, scale, || {
        uv_sphere(steps(level + 2), steps(level + 1))
    })
}

pub(super) fn add_flipcap_sphere(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    level: u32,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, 1.0, || {
        flipcap_sphere(steps(level + 2), steps(level + 1), 0.75)
    })
}

pub(super) fn add_sphere_cube(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    level: u32,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, 1.0, || {
        sphere_cube(steps(level), steps(level))
    })
}

pub(super) fn add_spherized_cube(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    level: u32,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, 1.0, || {
        spherized_cube(steps(level), steps(level), 0.75)
    })
}

pub(super) fn add_hollow_cut_sphere(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    level: u32,
    capped: bool,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, 1.0, || {
        if capped {
            hollow_cut_sphere_capped(steps(level), steps(level), 0.75)
        } else {
            hollow_cut_sphere(steps(level), steps(level), 0.75)
        }
    })
}

pub(super) fn add_floor(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    params: &FloorParams,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, 1.0, || floor(params))
}

/// Fibers grown out of the unit sphere. Every call draws from the same seed.
pub(super) fn add_fibers(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    params: &FiberParams,
) -> Result<Handle<Mesh>> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0);
    add_scaled(scene, name, material, 1.0, || Ok(fibers(&mut rng, params)))
}

pub(super) fn add_points(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
    count: usize,
    seed: u64,
) -> Result<Handle<Mesh>> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    add_scaled(scene, name, material, 1.0, || random_points(&mut rng, count))
}

/// Point light shape.
pub(super) fn add_point(
    scene: &mut Scene,
    name: &str,
    material: MaterialRef,
) -> Result<Handle<Mesh>> {
    add_scaled(scene, name, material, 1.0, || Ok(single_point(0.001)))
}

pub(super) fn at(x: f32, y: f32, z: f32) -> Placement {
    Placement::translation(Vector3::new(x, y, z))
}

pub(super) fn at_rotated(position: [f32; 3], degrees: [f32; 3]) -> Placement {
    Placement::euler(Vector3::from(position), Vector3::from(degrees))
}

/// The three reference objects shared by most simple scenes, from left to right.
pub(super) fn add_objects(
    scene: &mut Scene,
    materials: [Handle<Material>; 3],
) -> Result<[Handle<Instance>; 3]> {
    let obj01 = add_flipcap_sphere(scene, "obj01", Some(materials[0]), 5)?;
    let obj02 = add_spherized_cube(scene, "obj02", Some(materials[1]), 4)?;
    let obj03 = add_sphere_cube(scene, "obj03", Some(materials[2]), 4)?;
    Ok([
        scene.add_instance("obj01", obj01, at(-2.5, 0.0, 0.0)),
        scene.add_instance("obj02", obj02, Placement::identity()),
        scene.add_instance("obj03", obj03, at(2.5, 0.0, 0.0)),
    ])
}

/// Warped, textured floor one unit below the origin.
pub(super) fn add_default_floor(scene: &mut Scene) -> Result<Handle<Instance>> {
    let material = scene.add_preset_material("floor_txt")?;
    let mesh = add_floor(scene, "floor", Some(material), &FloorParams::default())?;
    Ok(scene.add_instance("floor", mesh, at(0.0, -1.0, 0.0)))
}

/// Grows hair on every part of the mesh of `instance`, placed like the instance itself.
pub(super) fn add_hair(
    scene: &mut Scene,
    instance: Handle<Instance>,
    params: &HairParams,
    seed: u64,
    material: Handle<Material>,
) -> Result<Handle<Instance>> {
    let instance_name = scene
        .instances
        .key(instance)
        .ok_or_else(|| InvariantError::dangling("instance", format!("#{}", instance.index())))?
        .to_string();
    let Instance { mesh, placement } = scene
        .instances
        .get(instance)
        .cloned()
        .ok_or_else(|| InvariantError::dangling("instance", &instance_name))?;
    let mesh_name = scene
        .meshes
        .key(mesh)
        .ok_or_else(|| InvariantError::dangling("mesh", &instance_name))?
        .to_string();
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let parts = scene
        .meshes
        .get(mesh)
        .map(|surface| {
            surface
                .parts
                .iter()
                .map(|part| MeshPart {
                    name: part.name.clone(),
                    shape: hair(&mut rng, &part.shape, params),
                    material: Some(material),
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let hair_mesh = scene.add_mesh(&format!("{mesh_name}_hair"), Mesh { parts });
    Ok(scene.add_instance(&format!("{instance_name}_hair"), hair_mesh, placement))
}

/// Perspective camera looking at the origin, with the default 16:9 aspect.
pub(super) fn add_camera(
    scene: &mut Scene,
    name: &str,
    eye: [f32; 3],
    height: f32,
    aperture: f32,
) -> Handle<Camera> {
    add_camera_towards(scene, name, eye, [0.0; 3], height, aperture, DEFAULT_ASPECT)
}

pub(super) fn add_camera_towards(
    scene: &mut Scene,
    name: &str,
    eye: [f32; 3],
    target: [f32; 3],
    height: f32,
    aperture: f32,
    aspect: f32,
) -> Handle<Camera> {
    let camera = Camera::look_at(
        Point3::from(eye),
        Point3::from(target),
        height,
        aperture,
        aspect,
    );
    scene.add_camera(name, camera)
}
