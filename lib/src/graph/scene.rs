use crate::geometry::{ColorRGB, Placement, Shape};
use crate::materials::Texture;
use crate::scene::{Handle, Library};
use cgmath::{EuclideanSpace, Point3, Transform};

/// Surface parameters of the metallic-roughness model.
#[derive(Debug, Clone, PartialEq)]
pub struct MetallicRoughness {
    pub base: ColorRGB,
    pub opacity: f32,
    pub metallic: f32,
    pub roughness: f32,
    pub base_texture: Option<Handle<Texture>>,
}

/// Material of the node graph. Materials without reflectance model only emit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphMaterial {
    pub emission: ColorRGB,
    pub emission_texture: Option<Handle<Texture>>,
    pub normal_texture: Option<Handle<Texture>>,
    pub metallic_roughness: Option<MetallicRoughness>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Option<Handle<GraphMaterial>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphMesh {
    pub primitives: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphCamera {
    pub ortho: bool,
    pub yfov: f32,
    pub aspect: f32,
    pub focus: f32,
    pub aperture: f32,
    pub near: f32,
    pub far: f32,
}

/// Node of the hierarchy. A node may carry a mesh, a camera, both or none.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub placement: Placement,
    pub mesh: Option<Handle<GraphMesh>>,
    pub camera: Option<Handle<GraphCamera>>,
    pub children: Vec<Handle<Node>>,
}

/// Hierarchical scene: nodes reference shared meshes, materials and cameras.
///
/// Unlike the flat scene, node names are not required to be unique.
#[derive(Debug, Clone, Default)]
pub struct GraphScene {
    pub textures: Library<Texture>,
    pub materials: Library<GraphMaterial>,
    pub meshes: Library<GraphMesh>,
    pub cameras: Library<GraphCamera>,
    pub nodes: Library<Node>,
    pub roots: Vec<Handle<Node>>,
}

impl GraphScene {
    /// Appends a root node.
    pub fn add_root(&mut self, name: &str, node: Node) -> Handle<Node> {
        let handle = self.nodes.push(name, node);
        self.roots.push(handle);
        handle
    }

    /// World space bounding box of every mesh reachable from the roots, as `(min, max)`.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut min = Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        let mut stack = self
            .roots
            .iter()
            .map(|root| (*root, Placement::identity().to_matrix()))
            .collect::<Vec<_>>();
        let mut empty = true;
        while let Some((handle, parent)) = stack.pop() {
            let node = match self.nodes.get(handle) {
                Some(node) => node,
                None => continue,
            };
            let matrix = parent * node.placement.to_matrix();
            if let Some(mesh) = node.mesh.and_then(|mesh| self.meshes.get(mesh)) {
                let points = mesh
                    .primitives
                    .iter()
                    .flat_map(|prim| prim.shape.vertices.pos.iter());
                for p in points {
                    let p = matrix.transform_point(*p);
                    min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
                    max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
                    empty = false;
                }
            }
            stack.extend(node.children.iter().map(|child| (*child, matrix)));
        }
        if empty {
            None
        } else {
            Some((min, max))
        }
    }

    /// Centre of the bounding box, or the origin for scenes without geometry.
    pub fn center(&self) -> Point3<f32> {
        self.bounds()
            .map(|(min, max)| min.midpoint(max))
            .unwrap_or_else(Point3::origin)
    }
}
