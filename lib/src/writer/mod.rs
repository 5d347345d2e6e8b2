//! Serialization of scenes and textures to disk.
mod obj;
pub use self::obj::{write_mtl, write_obj};
mod gltf;
pub use self::gltf::encode_gltf;
mod raster;
pub use self::raster::write_texture;
mod hasher;
pub use self::hasher::{hash_file, FileHasher};

use crate::error::Result;
use crate::graph::GraphScene;
use crate::scene::Scene;
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

fn logged(path: PathBuf) -> Result<PathBuf> {
    debug!("Wrote {} ({:016x})", path.display(), hash_file(&path)?);
    Ok(path)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes `<name>.obj` and `<name>.mtl` from `flat`, `<name>.gltf` and `<name>.bin` from `graph`.
///
/// Returns the written paths.
pub fn write_scene_files(
    dir: &Path,
    name: &str,
    flat: &Scene,
    graph: &GraphScene,
) -> Result<Vec<PathBuf>> {
    let mtl = dir.join(format!("{name}.mtl"));
    let mut out = create(&mtl)?;
    write_mtl(&mut out, flat)?;
    out.flush()?;
    let obj = dir.join(format!("{name}.obj"));
    let mut out = create(&obj)?;
    write_obj(&mut out, flat, &format!("{name}.mtl"))?;
    out.flush()?;
    let bin_name = format!("{name}.bin");
    let (json, bin) = encode_gltf(graph, &bin_name)?;
    let gltf = dir.join(format!("{name}.gltf"));
    fs::write(&gltf, json)?;
    let bin = if bin.is_empty() {
        None
    } else {
        let path = dir.join(bin_name);
        fs::write(&path, bin)?;
        Some(path)
    };
    [Some(obj), Some(mtl), Some(gltf), bin]
        .into_iter()
        .flatten()
        .map(logged)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::write_scene_files;
    use crate::geometry::ColorRGB;
    use crate::graph::SceneConverter;
    use crate::materials::Material;
    use crate::scene::{Mesh, Scene};
    use crate::shapes::quad;
    use tempfile::tempdir;

    #[test]
    fn scene_files() {
        let dir = tempdir().unwrap();
        let mut scene = Scene::new();
        let mat = scene.add_material("white", Material::diffuse(ColorRGB::gray(1.0), None));
        scene.add_mesh("quad", Mesh::single("quad", quad(2, 2).unwrap(), Some(mat)));
        let graph = SceneConverter::new().convert(&scene).unwrap();
        let written = write_scene_files(dir.path(), "quad", &scene, &graph).unwrap();
        let names = written
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["quad.obj", "quad.mtl", "quad.gltf", "quad.bin"]);
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn missing_directory() {
        let dir = tempdir().unwrap();
        let graph = SceneConverter::new().convert(&Scene::new()).unwrap();
        let missing = dir.path().join("nope");
        assert!(write_scene_files(&missing, "empty", &Scene::new(), &graph).is_err());
    }
}
