use super::objects::{add_cube, add_sphere};
use crate::error::Result;
use crate::scene::Scene;

/// Single-mesh scenes, written without nodes nor cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
}

impl MeshKind {
    pub const ALL: [MeshKind; 2] = [MeshKind::Cube, MeshKind::Sphere];

    pub fn name(&self) -> &'static str {
        match self {
            MeshKind::Cube => "cube",
            MeshKind::Sphere => "sphere",
        }
    }
}

pub(super) fn build(scene: &mut Scene, kind: MeshKind) -> Result<()> {
    let material = Some(scene.add_preset_material("plastic00")?);
    match kind {
        MeshKind::Cube => add_cube(scene, kind.name(), material, 0)?,
        MeshKind::Sphere => add_sphere(scene, kind.name(), material, 4, 1.0)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build, MeshKind};
    use crate::scene::Scene;

    #[test]
    fn single_mesh() {
        for kind in MeshKind::ALL {
            let mut scene = Scene::new();
            build(&mut scene, kind).unwrap();
            assert_eq!(scene.meshes.len(), 1);
            assert!(scene.meshes.find(kind.name()).is_some());
            assert!(scene.instances.is_empty());
            assert!(scene.cameras.is_empty());
        }
    }
}
