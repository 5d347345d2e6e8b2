use cgmath::{
    EuclideanSpace, InnerSpace, Matrix, Matrix3, Matrix4, Point3, SquareMatrix, Transform,
    Vector2, Vector3, Vector4,
};

/// Connectivity of a [Shape].
///
/// Every index must be strictly lower than the amount of vertices of the owning shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Elements {
    Points(Vec<u32>),
    Lines(Vec<[u32; 2]>),
    Triangles(Vec<[u32; 3]>),
}

impl Elements {
    /// Returns a static name for the topology kind, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Elements::Points(_) => "points",
            Elements::Lines(_) => "lines",
            Elements::Triangles(_) => "triangles",
        }
    }

    /// Amount of elements (not indices) in the set.
    pub fn len(&self) -> usize {
        match self {
            Elements::Points(p) => p.len(),
            Elements::Lines(l) => l.len(),
            Elements::Triangles(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an empty set with the same kind of `self`.
    pub fn empty_like(&self) -> Elements {
        match self {
            Elements::Points(_) => Elements::Points(Vec::new()),
            Elements::Lines(_) => Elements::Lines(Vec::new()),
            Elements::Triangles(_) => Elements::Triangles(Vec::new()),
        }
    }

    /// Iterates every index referenced by the set.
    pub fn indices(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            Elements::Points(p) => Box::new(p.iter().copied()),
            Elements::Lines(l) => Box::new(l.iter().flatten().copied()),
            Elements::Triangles(t) => Box::new(t.iter().flatten().copied()),
        }
    }
}

/// Per-vertex attributes, stored as parallel arrays indexed by vertex id.
///
/// `pos`, `norm` and `texcoord` always share the same length. `color` and `radius` are either
/// empty or of that same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffers {
    pub pos: Vec<Point3<f32>>,
    pub norm: Vec<Vector3<f32>>,
    pub texcoord: Vec<Vector2<f32>>,
    pub color: Vec<Vector4<f32>>,
    pub radius: Vec<f32>,
}

impl VertexBuffers {
    pub fn with_capacity(capacity: usize) -> Self {
        VertexBuffers {
            pos: Vec::with_capacity(capacity),
            norm: Vec::with_capacity(capacity),
            texcoord: Vec::with_capacity(capacity),
            color: Vec::new(),
            radius: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Checks that every populated buffer has the same length of the positions.
    pub fn is_consistent(&self) -> bool {
        let len = self.pos.len();
        self.norm.len() == len
            && self.texcoord.len() == len
            && (self.color.is_empty() || self.color.len() == len)
            && (self.radius.is_empty() || self.radius.len() == len)
    }
}

/// A single topology set with its vertex buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub elements: Elements,
    pub vertices: VertexBuffers,
}

impl Shape {
    /// Creates a shape with the given topology kind and no vertices.
    pub fn empty(elements: Elements) -> Self {
        Shape {
            elements: elements.empty_like(),
            vertices: VertexBuffers::default(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the triangles of this shape, or an empty slice for other topologies.
    pub fn triangles(&self) -> &[[u32; 3]] {
        match &self.elements {
            Elements::Triangles(t) => t,
            _ => &[],
        }
    }

    /// Checks buffer lengths and index bounds.
    pub fn is_valid(&self) -> bool {
        let count = self.vertex_count() as u32;
        self.vertices.is_consistent() && self.elements.indices().all(|i| i < count)
    }

    /// Uniformly scales every position by `factor`.
    pub fn scale(&mut self, factor: f32) {
        self.vertices
            .pos
            .iter_mut()
            .for_each(|p| *p = Point3::from_vec(p.to_vec() * factor));
    }

    /// Transforms positions and normals by the given affine matrix.
    ///
    /// Normals are transformed by the inverse transpose of the upper 3x3 part of `matrix` and
    /// re-normalized. Lines store tangents in place of normals, so they follow the upper 3x3
    /// part itself.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        let linear = Matrix3::from_cols(
            matrix.x.truncate(),
            matrix.y.truncate(),
            matrix.z.truncate(),
        );
        let normal_matrix = match self.elements {
            Elements::Lines(_) => linear,
            _ => linear
                .invert()
                .map(|inv| inv.transpose())
                .unwrap_or(linear),
        };
        for pos in self.vertices.pos.iter_mut() {
            *pos = matrix.transform_point(*pos);
        }
        for norm in self.vertices.norm.iter_mut() {
            let transformed = normal_matrix * *norm;
            if transformed.magnitude2() > 0.0 {
                *norm = transformed.normalize();
            }
        }
    }
}
