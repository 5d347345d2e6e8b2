use super::{
    DefaultCameraPolicy, FramingCamera, GraphCamera, GraphMaterial, GraphMesh, GraphScene,
    MetallicRoughness, Node, Primitive,
};
use crate::config::{CAMERA_FAR, CAMERA_NEAR};
use crate::error::InvariantError;
use crate::geometry::Placement;
use crate::materials::{Material, MaterialKind, Texture};
use crate::scene::{Handle, Scene};
use log::{debug, warn};

/// Resolves a source handle into the handle of its converted counterpart.
///
/// `None` stays `None`. A handle without counterpart is a dangling reference.
fn remap<S, D>(
    map: &[Handle<D>],
    handle: Option<Handle<S>>,
    kind: &'static str,
    owner: &str,
) -> Result<Option<Handle<D>>, InvariantError> {
    match handle {
        None => Ok(None),
        Some(handle) => match map.get(handle.index()) {
            Some(converted) => Ok(Some(*converted)),
            None => Err(InvariantError::dangling(
                kind,
                format!("{owner}#{}", handle.index()),
            )),
        },
    }
}

/// Converts a flat [Scene] into a [GraphScene].
///
/// Every entity keeps its name and relative order; references are remapped by identity.
pub struct SceneConverter {
    with_nodes: bool,
    camera_policy: Box<dyn DefaultCameraPolicy>,
}

impl Default for SceneConverter {
    fn default() -> Self {
        SceneConverter {
            with_nodes: true,
            camera_policy: Box::new(FramingCamera::default()),
        }
    }
}

impl SceneConverter {
    pub fn new() -> Self {
        SceneConverter::default()
    }

    /// Whether to emit nodes and cameras. Without nodes only resources are converted.
    pub fn with_nodes(mut self, with_nodes: bool) -> Self {
        self.with_nodes = with_nodes;
        self
    }

    /// Replaces the policy used when the source scene has no cameras.
    pub fn with_camera_policy(mut self, policy: impl DefaultCameraPolicy + 'static) -> Self {
        self.camera_policy = Box::new(policy);
        self
    }

    pub fn convert(&self, scene: &Scene) -> Result<GraphScene, InvariantError> {
        let mut graph = GraphScene::default();
        let textures = scene
            .textures
            .iter()
            .map(|(_, path, texture)| graph.textures.push(path, texture.clone()))
            .collect::<Vec<_>>();
        let mut materials = Vec::with_capacity(scene.materials.len());
        for (_, name, material) in scene.materials.iter() {
            let converted = convert_material(name, material, &textures)?;
            materials.push(graph.materials.push(name, converted));
        }
        let mut meshes = Vec::with_capacity(scene.meshes.len());
        for (_, name, mesh) in scene.meshes.iter() {
            let primitives = mesh
                .parts
                .iter()
                .map(|part| {
                    Ok(Primitive {
                        shape: part.shape.clone(),
                        material: remap(&materials, part.material, "material", &part.name)?,
                    })
                })
                .collect::<Result<Vec<_>, InvariantError>>()?;
            meshes.push(graph.meshes.push(name, GraphMesh { primitives }));
        }
        if self.with_nodes {
            self.convert_nodes(scene, &meshes, &mut graph)?;
            self.convert_cameras(scene, &mut graph);
            if !scene.environments.is_empty() {
                warn!(
                    "Dropping {} environments: not representable in the node graph",
                    scene.environments.len()
                );
            }
        }
        debug!(
            "Converted {} materials, {} meshes, {} nodes",
            graph.materials.len(),
            graph.meshes.len(),
            graph.nodes.len()
        );
        Ok(graph)
    }

    fn convert_nodes(
        &self,
        scene: &Scene,
        meshes: &[Handle<GraphMesh>],
        graph: &mut GraphScene,
    ) -> Result<(), InvariantError> {
        if scene.instances.is_empty() {
            for (handle, name, _) in scene.meshes.iter() {
                let node = Node {
                    mesh: Some(meshes[handle.index()]),
                    ..Default::default()
                };
                graph.add_root(name, node);
            }
        } else {
            for (_, name, instance) in scene.instances.iter() {
                let node = Node {
                    placement: instance.placement,
                    mesh: remap(meshes, Some(instance.mesh), "mesh", name)?,
                    ..Default::default()
                };
                graph.add_root(name, node);
            }
        }
        Ok(())
    }

    fn convert_cameras(&self, scene: &Scene, graph: &mut GraphScene) {
        if scene.cameras.is_empty() {
            for placed in self.camera_policy.default_cameras(graph) {
                let camera = graph.cameras.push(&placed.name, placed.camera);
                let node = Node {
                    placement: Placement::Matrix(placed.frame),
                    camera: Some(camera),
                    ..Default::default()
                };
                graph.add_root(&placed.name, node);
            }
        } else {
            for (_, name, src) in scene.cameras.iter() {
                let camera = graph.cameras.push(
                    name,
                    GraphCamera {
                        ortho: src.ortho,
                        yfov: src.yfov,
                        aspect: src.aspect,
                        focus: src.focus,
                        aperture: src.aperture,
                        near: CAMERA_NEAR,
                        far: CAMERA_FAR,
                    },
                );
                let node = Node {
                    placement: Placement::Matrix(src.frame),
                    camera: Some(camera),
                    ..Default::default()
                };
                graph.add_root(name, node);
            }
        }
    }
}

/// Maps a material to the metallic-roughness model.
///
/// Emissive and glass materials have no reflectance counterpart and only carry their emission.
/// Materials without kind are treated as plastic.
fn convert_material(
    name: &str,
    material: &Material,
    textures: &[Handle<Texture>],
) -> Result<GraphMaterial, InvariantError> {
    let surface = match material.kind.unwrap_or(MaterialKind::Plastic) {
        MaterialKind::Emission | MaterialKind::Glass => None,
        MaterialKind::Diffuse => Some((material.diffuse, 0.0, 1.0, material.diffuse_texture)),
        MaterialKind::Plastic => Some((
            material.diffuse,
            0.0,
            material.roughness.sqrt(),
            material.diffuse_texture,
        )),
        MaterialKind::Metal => Some((
            material.specular,
            1.0,
            material.roughness.sqrt(),
            material.specular_texture,
        )),
    };
    let mut converted = GraphMaterial {
        emission: material.emission,
        emission_texture: remap(textures, material.emission_texture, "texture", name)?,
        ..Default::default()
    };
    if let Some((base, metallic, roughness, base_texture)) = surface {
        converted.normal_texture = remap(textures, material.normal_texture, "texture", name)?;
        converted.metallic_roughness = Some(MetallicRoughness {
            base,
            opacity: material.opacity,
            metallic,
            roughness,
            base_texture: remap(textures, base_texture, "texture", name)?,
        });
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::SceneConverter;
    use crate::error::InvariantError;
    use crate::geometry::{ColorRGB, Placement};
    use crate::graph::{DefaultCameraPolicy, GraphScene, PlacedCamera};
    use crate::materials::{Material, MaterialKind};
    use crate::scene::{Camera, Handle, Instance, Mesh, Scene};
    use crate::shapes::{cube, quad};
    use cgmath::{Matrix4, Point3, SquareMatrix, Vector3};
    use float_cmp::assert_approx_eq;

    #[test]
    fn metallic_roughness_mapping() {
        let mut scene = Scene::new();
        let txt = scene.add_texture("grid.png");
        let color = ColorRGB::new(0.5, 0.2, 0.2);
        scene.add_material("matte", Material::diffuse(color, Some(txt)));
        scene.add_material("shiny", Material::metal(color, 0.09, None));
        scene.add_material("light", Material::emission(ColorRGB::gray(40.0), None));
        scene.add_material("glass", Material::glass(color, 0.0, None));
        let untagged = Material {
            kind: None,
            ..Material::plastic(color, 0.25, None)
        };
        scene.add_material("untagged", untagged);
        let graph = SceneConverter::new().convert(&scene).unwrap();
        let mr = |name: &str| {
            let handle = graph.materials.find(name).unwrap();
            graph.materials.get(handle).unwrap().metallic_roughness.clone()
        };
        let matte = mr("matte").unwrap();
        assert_eq!((matte.metallic, matte.roughness), (0.0, 1.0));
        assert_eq!(matte.base, color);
        assert_eq!(matte.base_texture, graph.textures.find("grid.png"));
        let shiny = mr("shiny").unwrap();
        assert_approx_eq!(f32, shiny.metallic, 1.0);
        assert_approx_eq!(f32, shiny.roughness, 0.3, epsilon = 1e-6);
        assert_eq!(shiny.base, color);
        assert!(mr("light").is_none());
        assert!(mr("glass").is_none());
        let untagged = mr("untagged").unwrap();
        assert_approx_eq!(f32, untagged.roughness, 0.5);
        let light = graph.materials.find("light").unwrap();
        assert_eq!(
            graph.materials.get(light).unwrap().emission,
            ColorRGB::gray(40.0)
        );
    }

    #[test]
    fn unknown_kind_is_rejected_at_parse() {
        assert_eq!(
            "subsurface".parse::<MaterialKind>(),
            Err(InvariantError::UnsupportedMaterialKind(
                "subsurface".to_string()
            ))
        );
    }

    #[test]
    fn one_node_per_mesh_without_instances() {
        let mut scene = Scene::new();
        let mat = scene.add_preset_material("plastic00").unwrap();
        for name in ["a", "b", "c", "d"] {
            scene.add_shape(name, Some(mat), || quad(1, 1)).unwrap();
        }
        let graph = SceneConverter::new().convert(&scene).unwrap();
        assert_eq!(graph.meshes.len(), 4);
        // four mesh nodes and the default camera
        let mesh_nodes = graph
            .roots
            .iter()
            .filter_map(|root| graph.nodes.get(*root).unwrap().mesh)
            .collect::<Vec<_>>();
        assert_eq!(mesh_nodes, graph.meshes.handles().collect::<Vec<_>>());
        for (node, name) in graph.roots.iter().zip(["a", "b", "c", "d"]) {
            assert_eq!(graph.nodes.key(*node), Some(name));
            assert!(graph.nodes.get(*node).unwrap().placement.is_identity());
        }
        assert_eq!(graph.cameras.len(), 1);
        assert_eq!(graph.nodes.len(), 5);
        let prim = &graph.meshes.get(mesh_nodes[0]).unwrap().primitives[0];
        assert_eq!(prim.material, graph.materials.find("plastic00"));
    }

    #[test]
    fn instances_and_cameras() {
        let mut scene = Scene::new();
        let mesh = scene.add_shape("box", None, || cube(1, 1)).unwrap();
        let placement =
            Placement::euler(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 45.0, 0.0));
        scene.add_instance("box01", mesh, placement);
        scene.add_instance("box02", mesh, Placement::identity());
        let camera = Camera::look_at(
            Point3::new(0.0, 3.0, 10.0),
            Point3::new(0.0, 0.0, 0.0),
            0.5,
            0.0,
            1.0,
        );
        scene.add_camera("cam", camera.clone());
        let graph = SceneConverter::new().convert(&scene).unwrap();
        assert_eq!(graph.meshes.len(), 1);
        assert_eq!(graph.nodes.len(), 3);
        let first = graph.nodes.get(graph.roots[0]).unwrap();
        assert_eq!(first.placement, placement);
        let second = graph.nodes.get(graph.roots[1]).unwrap();
        assert_eq!(first.mesh, second.mesh);
        let cam_node = graph.nodes.get(graph.roots[2]).unwrap();
        assert_eq!(cam_node.placement, Placement::Matrix(camera.frame));
        let cam = graph.cameras.get(cam_node.camera.unwrap()).unwrap();
        assert_approx_eq!(f32, cam.near, 0.1);
        assert_approx_eq!(f32, cam.far, 10000.0);
        assert_approx_eq!(f32, cam.yfov, camera.yfov);
    }

    #[test]
    fn resources_only() {
        let mut scene = Scene::new();
        scene.add_shape("cube", None, || cube(1, 1)).unwrap();
        let graph = SceneConverter::new()
            .with_nodes(false)
            .convert(&scene)
            .unwrap();
        assert_eq!(graph.meshes.len(), 1);
        assert!(graph.nodes.is_empty());
        assert!(graph.cameras.is_empty());
    }

    #[test]
    fn dangling_references() {
        let mut scene = Scene::new();
        let ghost = Handle::<Material>::new(7);
        scene.add_shape("quad", Some(ghost), || quad(1, 1)).unwrap();
        assert!(matches!(
            SceneConverter::new().convert(&scene),
            Err(InvariantError::DanglingReference { kind: "material", .. })
        ));
        let mut scene = Scene::new();
        scene.instances.insert(
            "lost",
            Instance {
                mesh: Handle::<Mesh>::new(0),
                placement: Placement::identity(),
            },
        );
        assert!(matches!(
            SceneConverter::new().convert(&scene),
            Err(InvariantError::DanglingReference { kind: "mesh", .. })
        ));
    }

    struct Fixed;

    impl DefaultCameraPolicy for Fixed {
        fn default_cameras(&self, _: &GraphScene) -> Vec<PlacedCamera> {
            Vec::new()
        }
    }

    #[test]
    fn custom_camera_policy() {
        let mut scene = Scene::new();
        scene.add_shape("cube", None, || cube(1, 1)).unwrap();
        let graph = SceneConverter::new()
            .with_camera_policy(Fixed)
            .convert(&scene)
            .unwrap();
        assert!(graph.cameras.is_empty());
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(
            graph.nodes.get(graph.roots[0]).unwrap().placement.to_matrix(),
            Matrix4::identity()
        );
    }
}
