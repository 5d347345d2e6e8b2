use super::lights::add_wide_lights;
use super::objects::{add_camera, add_cube, add_floor, add_sphere, add_sphere_cube, at};
use super::Lighting;
use crate::error::Result;
use crate::geometry::ColorRGB;
use crate::materials::Material;
use crate::scene::{Handle, Mesh, Scene};
use crate::shapes::FloorParams;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Distinct meshes shared by all the random instances.
const MESH_COUNT: usize = 10;

/// Size of the randomly instanced grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceCount {
    I100,
    I1600,
    I2500,
    I10000,
}

impl InstanceCount {
    pub const ALL: [InstanceCount; 4] = [
        InstanceCount::I100,
        InstanceCount::I1600,
        InstanceCount::I2500,
        InstanceCount::I10000,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InstanceCount::I100 => "instance100",
            InstanceCount::I1600 => "instance1600",
            InstanceCount::I2500 => "instance2500",
            InstanceCount::I10000 => "instance10000",
        }
    }

    pub fn count(&self) -> usize {
        match self {
            InstanceCount::I100 => 100,
            InstanceCount::I1600 => 1600,
            InstanceCount::I2500 => 2500,
            InstanceCount::I10000 => 10000,
        }
    }

    /// Spacing between two neighbouring grid cells.
    fn cell_size(&self) -> f32 {
        match self {
            InstanceCount::I100 => 4.0,
            InstanceCount::I1600 => 3.0,
            InstanceCount::I2500 | InstanceCount::I10000 => 2.0,
        }
    }
}

fn random_color<R: Rng>(rng: &mut R) -> ColorRGB {
    let (r, g, b) = rng.gen::<(f32, f32, f32)>();
    ColorRGB::new(0.5 + 0.5 * r, 0.5 + 0.5 * g, 0.5 + 0.5 * b)
}

fn add_random_meshes<R: Rng>(scene: &mut Scene, rng: &mut R) -> Result<Vec<Handle<Mesh>>> {
    let mut meshes = Vec::with_capacity(MESH_COUNT);
    for i in 0..MESH_COUNT {
        let material = if rng.gen::<u32>() % 2 == 0 {
            Material::diffuse(random_color(rng), None)
        } else {
            let color = random_color(rng);
            Material::plastic(color, 0.01 + 0.04 * rng.gen::<f32>(), None)
        };
        let material = Some(scene.add_material(&format!("mat{i:03}"), material));
        let name = format!("shp{i:03}");
        let mesh = match rng.gen::<u32>() % 3 {
            0 => add_sphere(scene, &name, material, 4, 1.0)?,
            1 => add_cube(scene, &name, material, 4)?,
            _ => add_sphere_cube(scene, &name, material, 4)?,
        };
        meshes.push(mesh);
    }
    Ok(meshes)
}

/// Places a square grid of jittered instances, each picking one of the shared meshes.
fn add_random_instances(scene: &mut Scene, count: InstanceCount) -> Result<()> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0);
    let meshes = add_random_meshes(scene, &mut rng)?;
    let side = ((count.count() as f32).sqrt() + 0.5) as usize;
    let half = (side / 2) as f32;
    let cell = count.cell_size();
    for j in 0..side {
        for i in 0..side {
            let mesh = meshes[rng.gen_range(0..meshes.len())];
            let jitter_x = rng.gen::<f32>() - 0.5;
            let jitter_z = rng.gen::<f32>() - 0.5;
            let x = cell * (i as f32 - half) + jitter_x;
            let z = cell * (j as f32 - half) + jitter_z;
            let name = format!("ist{:06}", j * side + i);
            scene.add_instance(&name, mesh, at(x, 0.0, z));
        }
    }
    Ok(())
}

pub(super) fn build(scene: &mut Scene, count: InstanceCount, lighting: Lighting) -> Result<()> {
    let cameras = [
        ("cam01", [0.0, 75.0, 75.0], 0.0),
        ("cam02", [0.0, 150.0, 150.0], 0.0),
        ("cam03", [0.0, 15.0, 75.0], 0.0),
        ("cam04", [0.0, 30.0, 150.0], 0.0),
        ("cam_dof", [0.0, 75.0, 75.0], 0.1),
    ];
    for (name, eye, aperture) in cameras {
        add_camera(scene, name, eye, 0.5, aperture);
    }
    let floor_material = scene.add_preset_material("floor_txt")?;
    let floor_params = FloorParams {
        texture_scale: 12.0,
        power: 0.0,
        level: 0,
        scale: 120.0,
    };
    let floor = add_floor(scene, "floor", Some(floor_material), &floor_params)?;
    scene.add_instance("floor", floor, at(0.0, -1.0, 0.0));
    add_random_instances(scene, count)?;
    add_wide_lights(scene, lighting)
}

#[cfg(test)]
mod tests {
    use super::{build, InstanceCount};
    use crate::presets::Lighting;
    use crate::scene::Scene;

    #[test]
    fn grid_size() {
        let mut scene = Scene::new();
        build(&mut scene, InstanceCount::I100, Lighting::Env).unwrap();
        // floor plus the 10x10 grid
        assert_eq!(scene.instances.len(), 101);
        assert_eq!(scene.meshes.len(), 11);
        assert!(scene.instances.find("ist000000").is_some());
        assert!(scene.instances.find("ist000099").is_some());
        assert_eq!(scene.cameras.len(), 5);
    }

    #[test]
    fn instances_share_meshes() {
        let mut scene = Scene::new();
        build(&mut scene, InstanceCount::I1600, Lighting::Point).unwrap();
        // floor, grid and three point lights
        assert_eq!(scene.instances.len(), 1 + 1600 + 3);
        assert_eq!(scene.meshes.len(), 1 + 10 + 3);
    }

    #[test]
    fn deterministic() {
        let mut first = Scene::new();
        let mut second = Scene::new();
        build(&mut first, InstanceCount::I100, Lighting::Area).unwrap();
        build(&mut second, InstanceCount::I100, Lighting::Area).unwrap();
        let placements = |s: &Scene| {
            s.instances
                .iter()
                .map(|(_, _, i)| (i.mesh, i.placement))
                .collect::<Vec<_>>()
        };
        assert_eq!(placements(&first), placements(&second));
    }
}
