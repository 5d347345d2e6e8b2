use super::{Camera, Handle, Library};
use crate::error::{InvariantError, ValidationError};
use crate::geometry::{lookat_light_frame, Placement, Shape};
use crate::materials::{material_preset, Material, Texture};
use cgmath::{Matrix4, Point3, Vector3};
use log::debug;

/// Named part of a mesh: a single topology set and its material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub name: String,
    pub shape: Shape,
    pub material: Option<Handle<Material>>,
}

/// Ordered collection of parts, possibly with different materials.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub parts: Vec<MeshPart>,
}

impl Mesh {
    /// Mesh composed of a single part.
    pub fn single(name: &str, shape: Shape, material: Option<Handle<Material>>) -> Self {
        Mesh {
            parts: vec![MeshPart {
                name: name.to_string(),
                shape,
                material,
            }],
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.shape.triangles().len()).sum()
    }

    /// Applies an affine transformation to every part.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        self.parts.iter_mut().for_each(|p| p.shape.transform(matrix));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub mesh: Handle<Mesh>,
    pub placement: Placement,
}

/// Distant emitter surrounding the scene, such as a sky map.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub material: Handle<Material>,
    pub frame: Matrix4<f32>,
}

/// Flat, attribute based scene.
///
/// Every entity is owned by the scene and addressed by [Handle]s. Entities are keyed by name
/// (textures by path) and adding an already existing key returns the stored entity.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub cameras: Library<Camera>,
    pub materials: Library<Material>,
    pub textures: Library<Texture>,
    pub meshes: Library<Mesh>,
    pub instances: Library<Instance>,
    pub environments: Library<Environment>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    /// Registers a texture by path. Pixels are not loaded.
    pub fn add_texture(&mut self, path: &str) -> Handle<Texture> {
        self.textures.get_or_insert_with(path, Texture::default)
    }

    pub fn add_material(&mut self, name: &str, material: Material) -> Handle<Material> {
        self.materials.insert(name, material)
    }

    /// Adds one of the named materials, along with the textures it uses.
    pub fn add_preset_material(
        &mut self,
        name: &str,
    ) -> Result<Handle<Material>, ValidationError> {
        if let Some(handle) = self.materials.find(name) {
            return Ok(handle);
        }
        let preset =
            material_preset(name).ok_or_else(|| ValidationError::preset("material", name))?;
        let texture = preset.texture.map(|path| self.add_texture(path));
        let normal_map = preset.normal_map.map(|path| self.add_texture(path));
        Ok(self.add_material(name, preset.build(texture, normal_map)))
    }

    pub fn add_mesh(&mut self, name: &str, mesh: Mesh) -> Handle<Mesh> {
        self.meshes.insert(name, mesh)
    }

    /// Adds a single-part mesh named `name`, tessellating it only if the name is new.
    pub fn add_shape<E>(
        &mut self,
        name: &str,
        material: Option<Handle<Material>>,
        shape: impl FnOnce() -> Result<Shape, E>,
    ) -> Result<Handle<Mesh>, E> {
        self.meshes
            .get_or_try_insert_with(name, || Ok(Mesh::single(name, shape()?, material)))
    }

    pub fn add_instance(
        &mut self,
        name: &str,
        mesh: Handle<Mesh>,
        placement: Placement,
    ) -> Handle<Instance> {
        self.instances.insert(name, Instance { mesh, placement })
    }

    pub fn add_camera(&mut self, name: &str, camera: Camera) -> Handle<Camera> {
        self.cameras.insert(name, camera)
    }

    /// Adds an environment. Without an explicit frame, the environment faces the -x axis.
    pub fn add_environment(
        &mut self,
        name: &str,
        material: Handle<Material>,
        frame: Option<Matrix4<f32>>,
    ) -> Handle<Environment> {
        let frame = frame.unwrap_or_else(|| {
            lookat_light_frame(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(-1.5, 0.0, 0.0),
                Vector3::unit_y(),
            )
        });
        self.environments.insert(name, Environment { material, frame })
    }

    /// Bakes every instance placement into a copy of its mesh and removes the instances.
    ///
    /// The resulting meshes are named after the instances. Meshes not referenced by any
    /// instance are dropped. A scene without instances is left untouched.
    pub fn flatten_instances(&mut self) -> Result<(), InvariantError> {
        if self.instances.is_empty() {
            return Ok(());
        }
        let mut meshes = Library::with_capacity(self.instances.len());
        for (_, name, instance) in self.instances.iter() {
            let mut mesh = self
                .meshes
                .get(instance.mesh)
                .cloned()
                .ok_or_else(|| InvariantError::dangling("mesh", name))?;
            if !instance.placement.is_identity() {
                mesh.transform(&instance.placement.to_matrix());
            }
            meshes.push(name, mesh);
        }
        debug!(
            "Flattened {} instances of {} meshes",
            meshes.len(),
            self.meshes.len()
        );
        self.meshes = meshes;
        self.instances = Library::new();
        Ok(())
    }
}
