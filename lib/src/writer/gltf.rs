use crate::error::{InvariantError, Result};
use crate::geometry::{Elements, Placement, Shape};
use crate::graph::{GraphCamera, GraphMaterial, GraphScene, Primitive};
use crate::materials::Texture;
use crate::scene::{Handle, Library};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    asset: Asset,
    scene: usize,
    scenes: Vec<SceneDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<NodeDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    meshes: Vec<MeshDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    materials: Vec<MaterialDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    textures: Vec<TextureDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<ImageDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cameras: Vec<CameraDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    accessors: Vec<Accessor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    buffer_views: Vec<BufferView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    buffers: Vec<Buffer>,
}

#[derive(Debug, Serialize)]
struct Asset {
    version: &'static str,
    generator: &'static str,
}

#[derive(Debug, Serialize)]
struct SceneDef {
    nodes: Vec<usize>,
}

#[derive(Debug, Default, Serialize)]
struct NodeDef {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mesh: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    camera: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<[f32; 16]>,
}

#[derive(Debug, Serialize)]
struct MeshDef {
    name: String,
    primitives: Vec<PrimitiveDef>,
}

#[derive(Debug, Serialize)]
struct PrimitiveDef {
    attributes: BTreeMap<&'static str, usize>,
    indices: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    material: Option<usize>,
    mode: u32,
}

#[derive(Debug, Serialize)]
struct TextureRef {
    index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PbrDef {
    base_color_factor: [f32; 4],
    metallic_factor: f32,
    roughness_factor: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_color_texture: Option<TextureRef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MaterialDef {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pbr_metallic_roughness: Option<PbrDef>,
    emissive_factor: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    emissive_texture: Option<TextureRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    normal_texture: Option<TextureRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alpha_mode: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct TextureDef {
    source: usize,
}

#[derive(Debug, Serialize)]
struct ImageDef {
    uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Perspective {
    aspect_ratio: f32,
    yfov: f32,
    znear: f32,
    zfar: f32,
}

#[derive(Debug, Serialize)]
struct Orthographic {
    xmag: f32,
    ymag: f32,
    znear: f32,
    zfar: f32,
}

#[derive(Debug, Serialize)]
struct CameraDef {
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    perspective: Option<Perspective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    orthographic: Option<Orthographic>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    buffer_view: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<Vec<f32>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    buffer: usize,
    byte_offset: usize,
    byte_length: usize,
    target: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Buffer {
    byte_length: usize,
    uri: String,
}

/// Accumulates the binary attachment, one buffer view per accessor.
#[derive(Default)]
struct BinaryBuilder {
    data: Vec<u8>,
    views: Vec<BufferView>,
    accessors: Vec<Accessor>,
}

impl BinaryBuilder {
    fn push_view(&mut self, bytes: impl Iterator<Item = [u8; 4]>, target: u32) -> usize {
        let offset = self.data.len();
        bytes.for_each(|b| self.data.extend_from_slice(&b));
        self.views.push(BufferView {
            buffer: 0,
            byte_offset: offset,
            byte_length: self.data.len() - offset,
            target,
        });
        self.views.len() - 1
    }

    fn push_accessor(&mut self, accessor: Accessor) -> usize {
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    /// Stores tightly packed float vectors of `N` components.
    fn push_vectors<const N: usize>(&mut self, values: &[[f32; N]], bounds: bool) -> usize {
        let kind = match N {
            2 => "VEC2",
            3 => "VEC3",
            _ => "VEC4",
        };
        let view = self.push_view(
            values.iter().flatten().map(|v| v.to_le_bytes()),
            ARRAY_BUFFER,
        );
        let (min, max) = if bounds {
            let mut min = [f32::INFINITY; N];
            let mut max = [f32::NEG_INFINITY; N];
            for v in values {
                for c in 0..N {
                    min[c] = min[c].min(v[c]);
                    max[c] = max[c].max(v[c]);
                }
            }
            (Some(min.to_vec()), Some(max.to_vec()))
        } else {
            (None, None)
        };
        self.push_accessor(Accessor {
            buffer_view: view,
            component_type: FLOAT,
            count: values.len(),
            kind,
            min,
            max,
        })
    }

    fn push_indices(&mut self, elements: &Elements) -> usize {
        let view = self.push_view(
            elements.indices().map(|i| i.to_le_bytes()),
            ELEMENT_ARRAY_BUFFER,
        );
        let count = match elements {
            Elements::Points(p) => p.len(),
            Elements::Lines(l) => 2 * l.len(),
            Elements::Triangles(t) => 3 * t.len(),
        };
        self.push_accessor(Accessor {
            buffer_view: view,
            component_type: UNSIGNED_INT,
            count,
            kind: "SCALAR",
            min: None,
            max: None,
        })
    }

    fn push_primitive(&mut self, shape: &Shape, material: Option<usize>) -> PrimitiveDef {
        let vertices = &shape.vertices;
        let mut attributes = BTreeMap::new();
        let pos = vertices.pos.iter().map(|p| [p.x, p.y, p.z]).collect::<Vec<_>>();
        attributes.insert("POSITION", self.push_vectors(&pos, true));
        let norm = vertices.norm.iter().map(|n| [n.x, n.y, n.z]).collect::<Vec<_>>();
        attributes.insert("NORMAL", self.push_vectors(&norm, false));
        if !vertices.texcoord.is_empty() {
            let uv = vertices.texcoord.iter().map(|t| [t.x, t.y]).collect::<Vec<_>>();
            attributes.insert("TEXCOORD_0", self.push_vectors(&uv, false));
        }
        if !vertices.color.is_empty() {
            let color = vertices.color.iter().map(|c| (*c).into());
            let color = color.collect::<Vec<[f32; 4]>>();
            attributes.insert("COLOR_0", self.push_vectors(&color, false));
        }
        let mode = match shape.elements {
            Elements::Points(_) => 0,
            Elements::Lines(_) => 1,
            Elements::Triangles(_) => 4,
        };
        PrimitiveDef {
            attributes,
            indices: self.push_indices(&shape.elements),
            material,
            mode,
        }
    }
}

/// Index of `handle` in `library`, failing if the entry does not exist.
fn index_of<T>(
    library: &Library<T>,
    handle: Handle<T>,
    kind: &'static str,
    owner: &str,
) -> Result<usize, InvariantError> {
    match library.get(handle) {
        Some(_) => Ok(handle.index()),
        None => Err(InvariantError::dangling(
            kind,
            format!("{owner}#{}", handle.index()),
        )),
    }
}

fn texture_ref(
    graph: &GraphScene,
    texture: Option<Handle<Texture>>,
    owner: &str,
) -> Result<Option<TextureRef>, InvariantError> {
    texture
        .map(|t| index_of(&graph.textures, t, "texture", owner).map(|index| TextureRef { index }))
        .transpose()
}

fn material_def(graph: &GraphScene, name: &str, material: &GraphMaterial) -> Result<MaterialDef> {
    let pbr = match &material.metallic_roughness {
        Some(mr) => Some(PbrDef {
            base_color_factor: [mr.base.r, mr.base.g, mr.base.b, mr.opacity],
            metallic_factor: mr.metallic,
            roughness_factor: mr.roughness,
            base_color_texture: texture_ref(graph, mr.base_texture, name)?,
        }),
        None => None,
    };
    let blend = material
        .metallic_roughness
        .as_ref()
        .map_or(false, |mr| mr.opacity < 1.0);
    Ok(MaterialDef {
        name: name.to_string(),
        pbr_metallic_roughness: pbr,
        emissive_factor: material.emission.to_array(),
        emissive_texture: texture_ref(graph, material.emission_texture, name)?,
        normal_texture: texture_ref(graph, material.normal_texture, name)?,
        alpha_mode: blend.then_some("BLEND"),
    })
}

fn camera_def(name: &str, camera: &GraphCamera) -> CameraDef {
    if camera.ortho {
        let ymag = (camera.yfov / 2.0).tan();
        CameraDef {
            name: name.to_string(),
            kind: "orthographic",
            perspective: None,
            orthographic: Some(Orthographic {
                xmag: ymag * camera.aspect,
                ymag,
                znear: camera.near,
                zfar: camera.far,
            }),
        }
    } else {
        CameraDef {
            name: name.to_string(),
            kind: "perspective",
            perspective: Some(Perspective {
                aspect_ratio: camera.aspect,
                yfov: camera.yfov,
                znear: camera.near,
                zfar: camera.far,
            }),
            orthographic: None,
        }
    }
}

fn set_placement(node: &mut NodeDef, placement: &Placement) {
    if placement.is_identity() {
        return;
    }
    match placement {
        Placement::Trs {
            translation,
            rotation,
            scale,
        } => {
            node.translation = Some((*translation).into());
            node.rotation = Some([rotation.v.x, rotation.v.y, rotation.v.z, rotation.s]);
            node.scale = Some((*scale).into());
        }
        Placement::Matrix(m) => {
            let m: &[f32; 16] = m.as_ref();
            node.matrix = Some(*m);
        }
    }
}

/// Encodes `graph` as glTF 2.0 JSON plus its binary attachment, referenced as `bin_uri`.
///
/// The output only depends on the content of `graph`. Meshes without any non-empty primitive
/// are left out, and nodes referencing them carry no mesh.
pub fn encode_gltf(graph: &GraphScene, bin_uri: &str) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut binary = BinaryBuilder::default();
    let mut meshes = Vec::with_capacity(graph.meshes.len());
    // position of each graph mesh in `meshes`
    let mut mesh_index = Vec::with_capacity(graph.meshes.len());
    for (_, name, mesh) in graph.meshes.iter() {
        let mut primitives = Vec::with_capacity(mesh.primitives.len());
        for Primitive { shape, material } in &mesh.primitives {
            if shape.vertex_count() == 0 {
                debug!("Skipping empty primitive of {name}");
                continue;
            }
            let material = material
                .map(|m| index_of(&graph.materials, m, "material", name))
                .transpose()?;
            primitives.push(binary.push_primitive(shape, material));
        }
        if primitives.is_empty() {
            debug!("Skipping empty mesh {name}");
            mesh_index.push(None);
            continue;
        }
        mesh_index.push(Some(meshes.len()));
        meshes.push(MeshDef {
            name: name.to_string(),
            primitives,
        });
    }
    let materials = graph
        .materials
        .iter()
        .map(|(_, name, material)| material_def(graph, name, material))
        .collect::<Result<Vec<_>>>()?;
    let mut nodes = Vec::with_capacity(graph.nodes.len());
    for (_, name, node) in graph.nodes.iter() {
        let mut def = NodeDef {
            name: name.to_string(),
            mesh: node
                .mesh
                .map(|m| index_of(&graph.meshes, m, "mesh", name))
                .transpose()?
                .and_then(|m| mesh_index.get(m).copied().flatten()),
            camera: node
                .camera
                .map(|c| index_of(&graph.cameras, c, "camera", name))
                .transpose()?,
            children: node
                .children
                .iter()
                .map(|c| index_of(&graph.nodes, *c, "node", name))
                .collect::<Result<_, _>>()?,
            ..Default::default()
        };
        set_placement(&mut def, &node.placement);
        nodes.push(def);
    }
    let roots = graph
        .roots
        .iter()
        .map(|r| index_of(&graph.nodes, *r, "node", "roots"))
        .collect::<Result<_, _>>()?;
    let BinaryBuilder {
        data,
        views,
        accessors,
    } = binary;
    let buffers = if data.is_empty() {
        Vec::new()
    } else {
        vec![Buffer {
            byte_length: data.len(),
            uri: bin_uri.to_string(),
        }]
    };
    let document = Document {
        asset: Asset {
            version: "2.0",
            generator: env!("CARGO_PKG_NAME"),
        },
        scene: 0,
        scenes: vec![SceneDef { nodes: roots }],
        nodes,
        meshes,
        materials,
        textures: (0..graph.textures.len())
            .map(|source| TextureDef { source })
            .collect(),
        images: graph
            .textures
            .iter()
            .map(|(_, path, _)| ImageDef {
                uri: path.to_string(),
            })
            .collect(),
        cameras: graph
            .cameras
            .iter()
            .map(|(_, name, camera)| camera_def(name, camera))
            .collect(),
        accessors,
        buffer_views: views,
        buffers,
    };
    let json = serde_json::to_vec_pretty(&document)?;
    Ok((json, data))
}
