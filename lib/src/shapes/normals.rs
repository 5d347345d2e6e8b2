use crate::geometry::{Elements, Shape};
use cgmath::{InnerSpace, Vector3};

fn normalize_or(v: Vector3<f32>, fallback: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > 0.0 {
        v.normalize()
    } else {
        fallback
    }
}

/// Recomputes the per-vertex normals of a shape.
///
/// Triangles get area-weighted face normals, lines get the average of their segment tangents.
/// Points are left untouched.
pub fn compute_normals(shape: &mut Shape) {
    let zero = Vector3::new(0.0, 0.0, 0.0);
    let pos = &shape.vertices.pos;
    let mut acc = vec![zero; pos.len()];
    match &shape.elements {
        Elements::Triangles(triangles) => {
            for t in triangles {
                let (a, b, c) = (t[0] as usize, t[1] as usize, t[2] as usize);
                // not normalized: the magnitude is twice the triangle area
                let n = (pos[b] - pos[a]).cross(pos[c] - pos[a]);
                acc[a] += n;
                acc[b] += n;
                acc[c] += n;
            }
        }
        Elements::Lines(lines) => {
            for l in lines {
                let (a, b) = (l[0] as usize, l[1] as usize);
                let tangent = normalize_or(pos[b] - pos[a], zero);
                acc[a] += tangent;
                acc[b] += tangent;
            }
        }
        Elements::Points(_) => return,
    }
    shape.vertices.norm = acc
        .into_iter()
        .map(|n| normalize_or(n, Vector3::unit_z()))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::compute_normals;
    use crate::geometry::{make_lines, make_triangles};
    use cgmath::{Point3, Vector2, Vector3};
    use float_cmp::assert_approx_eq;

    #[test]
    fn triangle_normals() {
        let mut shape = make_triangles(
            3,
            3,
            |uv| Point3::new(uv.x, 0.0, -uv.y),
            |_| Vector3::unit_x(),
            |uv| uv,
        )
        .unwrap();
        compute_normals(&mut shape);
        for n in &shape.vertices.norm {
            assert_approx_eq!(f32, n.y, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn line_tangents() {
        let mut shape = make_lines(
            2,
            4,
            |s, u| Point3::new(s as f32, 2.0 * u, 0.0),
            |_, _| Vector3::unit_z(),
            |s, u| Vector2::new(u, s as f32),
            |_, _| 0.1,
        );
        compute_normals(&mut shape);
        for n in &shape.vertices.norm {
            assert_approx_eq!(f32, n.y, 1.0, epsilon = 1e-6);
        }
    }
}
