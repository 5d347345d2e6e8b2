use super::{Elements, Shape, VertexBuffers};
use crate::error::InvariantError;
use cgmath::{Point3, Vector2, Vector3};

fn ensure_positive(what: &'static str, value: usize) -> Result<(), InvariantError> {
    if value == 0 {
        Err(InvariantError::DegenerateTessellationInput { what, value })
    } else {
        Ok(())
    }
}

/// Tessellates a parametric surface over a regular grid on `[0,1]²`.
///
/// The three functions are evaluated once per grid point, in increasing vertex id order. Vertex
/// `(i, j)` has id `j * (usteps + 1) + i` and each grid cell emits two triangles, wound
/// counter-clockwise when u maps to x and v to y.
pub fn make_triangles(
    usteps: usize,
    vsteps: usize,
    mut pos: impl FnMut(Vector2<f32>) -> Point3<f32>,
    mut norm: impl FnMut(Vector2<f32>) -> Vector3<f32>,
    mut texcoord: impl FnMut(Vector2<f32>) -> Vector2<f32>,
) -> Result<Shape, InvariantError> {
    ensure_positive("usteps", usteps)?;
    ensure_positive("vsteps", vsteps)?;
    let count = (usteps + 1) * (vsteps + 1);
    let mut vertices = VertexBuffers::with_capacity(count);
    for j in 0..=vsteps {
        for i in 0..=usteps {
            let uv = Vector2::new(i as f32 / usteps as f32, j as f32 / vsteps as f32);
            vertices.pos.push(pos(uv));
            vertices.norm.push(norm(uv));
            vertices.texcoord.push(texcoord(uv));
        }
    }
    let vid = |i: usize, j: usize| (j * (usteps + 1) + i) as u32;
    let mut triangles = Vec::with_capacity(2 * usteps * vsteps);
    for j in 0..vsteps {
        for i in 0..usteps {
            let v00 = vid(i, j);
            let v10 = vid(i + 1, j);
            let v11 = vid(i + 1, j + 1);
            let v01 = vid(i, j + 1);
            triangles.push([v00, v10, v11]);
            triangles.push([v00, v11, v01]);
        }
    }
    Ok(Shape {
        elements: Elements::Triangles(triangles),
        vertices,
    })
}

/// Tessellates `num` independent strands made of `segments` line segments each.
///
/// Functions receive the strand index and the parameter `u` along the strand. Zero strands or
/// zero segments produce an empty line set.
pub fn make_lines(
    num: usize,
    segments: usize,
    mut pos: impl FnMut(usize, f32) -> Point3<f32>,
    mut norm: impl FnMut(usize, f32) -> Vector3<f32>,
    mut texcoord: impl FnMut(usize, f32) -> Vector2<f32>,
    mut radius: impl FnMut(usize, f32) -> f32,
) -> Shape {
    if num == 0 || segments == 0 {
        return Shape::empty(Elements::Lines(Vec::new()));
    }
    let count = num * (segments + 1);
    let mut vertices = VertexBuffers::with_capacity(count);
    vertices.radius.reserve(count);
    for strand in 0..num {
        for k in 0..=segments {
            let u = k as f32 / segments as f32;
            vertices.pos.push(pos(strand, u));
            vertices.norm.push(norm(strand, u));
            vertices.texcoord.push(texcoord(strand, u));
            vertices.radius.push(radius(strand, u));
        }
    }
    let mut lines = Vec::with_capacity(num * segments);
    for strand in 0..num {
        let base = strand * (segments + 1);
        for k in 0..segments {
            lines.push([(base + k) as u32, (base + k + 1) as u32]);
        }
    }
    Shape {
        elements: Elements::Lines(lines),
        vertices,
    }
}

/// Generates `count` unconnected point vertices. Sample `i` is evaluated at `u = i / count`.
pub fn make_points(
    count: usize,
    mut pos: impl FnMut(usize, f32) -> Point3<f32>,
    mut norm: impl FnMut(usize, f32) -> Vector3<f32>,
    mut texcoord: impl FnMut(usize, f32) -> Vector2<f32>,
    mut radius: impl FnMut(usize, f32) -> f32,
) -> Result<Shape, InvariantError> {
    ensure_positive("count", count)?;
    let mut vertices = VertexBuffers::with_capacity(count);
    vertices.radius.reserve(count);
    for i in 0..count {
        let u = i as f32 / count as f32;
        vertices.pos.push(pos(i, u));
        vertices.norm.push(norm(i, u));
        vertices.texcoord.push(texcoord(i, u));
        vertices.radius.push(radius(i, u));
    }
    Ok(Shape {
        elements: Elements::Points((0..count as u32).collect()),
        vertices,
    })
}

#[cfg(test)]
mod tests {
    use super::{make_lines, make_points, make_triangles};
    use crate::error::InvariantError;
    use crate::geometry::Elements;
    use cgmath::{Point3, Vector2, Vector3};

    fn planar(usteps: usize, vsteps: usize) -> Result<crate::geometry::Shape, InvariantError> {
        make_triangles(
            usteps,
            vsteps,
            |uv| Point3::new(uv.x, uv.y, 0.0),
            |_| Vector3::unit_z(),
            |uv| uv,
        )
    }

    #[test]
    fn triangle_counts() {
        for (usteps, vsteps) in [(1, 1), (3, 7), (16, 2)] {
            let shape = planar(usteps, vsteps).unwrap();
            assert_eq!(shape.vertex_count(), (usteps + 1) * (vsteps + 1));
            assert_eq!(shape.triangles().len(), 2 * usteps * vsteps);
            assert!(shape.is_valid());
        }
    }

    #[test]
    fn triangle_winding() {
        let shape = planar(4, 4).unwrap();
        let pos = &shape.vertices.pos;
        for tri in shape.triangles() {
            let a = pos[tri[0] as usize];
            let b = pos[tri[1] as usize];
            let c = pos[tri[2] as usize];
            let z = (b - a).cross(c - a).z;
            assert!(z > 0.0);
        }
    }

    #[test]
    fn degenerate_steps() {
        assert_eq!(
            planar(0, 4).unwrap_err(),
            InvariantError::DegenerateTessellationInput {
                what: "usteps",
                value: 0
            }
        );
        assert!(planar(4, 0).is_err());
        let points = make_points(
            0,
            |_, _| Point3::new(0.0, 0.0, 0.0),
            |_, _| Vector3::unit_z(),
            |_, u| Vector2::new(u, 0.0),
            |_, _| 0.1,
        );
        assert!(points.is_err());
    }

    #[test]
    fn line_counts() {
        let shape = make_lines(
            5,
            3,
            |s, u| Point3::new(s as f32, u, 0.0),
            |_, _| Vector3::unit_y(),
            |s, u| Vector2::new(u, s as f32),
            |_, u| 1.0 - u,
        );
        assert_eq!(shape.vertex_count(), 5 * 4);
        match &shape.elements {
            Elements::Lines(lines) => {
                assert_eq!(lines.len(), 15);
                assert_eq!(lines[3], [4, 5]);
            }
            _ => panic!("expected lines"),
        }
        assert!(shape.is_valid());
    }

    #[test]
    fn empty_lines() {
        let none = make_lines(
            0,
            3,
            |_, _| Point3::new(0.0, 0.0, 0.0),
            |_, _| Vector3::unit_y(),
            |_, u| Vector2::new(u, 0.0),
            |_, _| 0.0,
        );
        assert!(none.vertices.is_empty());
        assert!(none.elements.is_empty());
        let flat = make_lines(
            4,
            0,
            |_, _| Point3::new(0.0, 0.0, 0.0),
            |_, _| Vector3::unit_y(),
            |_, u| Vector2::new(u, 0.0),
            |_, _| 0.0,
        );
        assert!(flat.vertices.is_empty());
        assert_eq!(flat.elements, Elements::Lines(vec![]));
    }

    #[test]
    fn points_parameter() {
        let mut seen = Vec::new();
        let shape = make_points(
            4,
            |i, u| {
                seen.push((i, u));
                Point3::new(u, 0.0, 0.0)
            },
            |_, _| Vector3::unit_z(),
            |_, u| Vector2::new(u, 0.0),
            |_, _| 0.5,
        )
        .unwrap();
        assert_eq!(seen, vec![(0, 0.0), (1, 0.25), (2, 0.5), (3, 0.75)]);
        assert_eq!(shape.elements, Elements::Points(vec![0, 1, 2, 3]));
    }
}
