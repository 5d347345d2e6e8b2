use crate::geometry::{Distribution1D, Shape};
use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector2, Vector3};
use rand::Rng;

/// Points drawn on the surface of a triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceSamples {
    pub pos: Vec<Point3<f32>>,
    pub norm: Vec<Vector3<f32>>,
    pub texcoord: Vec<Vector2<f32>>,
    /// Index of the triangle each sample was drawn from.
    pub triangle: Vec<usize>,
}

impl SurfaceSamples {
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }
}

fn triangle_area(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> f32 {
    (b - a).cross(c - a).magnitude() * 0.5
}

/// Draws `count` points on the triangles of `shape`, with probability proportional to area.
///
/// Attributes are interpolated with the barycentric coordinates of each sample; normals are
/// re-normalized. Shapes without triangles yield no samples.
pub fn sample_triangles<R: Rng>(rng: &mut R, shape: &Shape, count: usize) -> SurfaceSamples {
    let triangles = shape.triangles();
    let mut samples = SurfaceSamples::default();
    if triangles.is_empty() {
        return samples;
    }
    let v = &shape.vertices;
    let areas = Distribution1D::new(triangles.iter().map(|t| {
        triangle_area(v.pos[t[0] as usize], v.pos[t[1] as usize], v.pos[t[2] as usize])
    }));
    samples.pos.reserve(count);
    samples.norm.reserve(count);
    samples.texcoord.reserve(count);
    samples.triangle.reserve(count);
    for _ in 0..count {
        let picked = areas
            .sample_discrete(rng.gen::<f32>())
            .unwrap_or_default();
        let t = triangles[picked];
        let (i0, i1, i2) = (t[0] as usize, t[1] as usize, t[2] as usize);
        // uniform barycentric coordinates
        let su = rng.gen::<f32>().sqrt();
        let r2 = rng.gen::<f32>();
        let b1 = r2 * su;
        let b0 = 1.0 - su;
        let b2 = 1.0 - b0 - b1;
        let pos = v.pos[i0].to_vec() * b0 + v.pos[i1].to_vec() * b1 + v.pos[i2].to_vec() * b2;
        let norm = v.norm[i0] * b0 + v.norm[i1] * b1 + v.norm[i2] * b2;
        let texcoord = v.texcoord[i0] * b0 + v.texcoord[i1] * b1 + v.texcoord[i2] * b2;
        samples.pos.push(Point3::from_vec(pos));
        samples.norm.push(if norm.magnitude2() > 0.0 {
            norm.normalize()
        } else {
            norm
        });
        samples.texcoord.push(texcoord);
        samples.triangle.push(picked);
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::sample_triangles;
    use crate::geometry::{Elements, Shape, VertexBuffers};
    use crate::shapes::quad;
    use cgmath::{Point3, Vector2, Vector3};
    use float_cmp::assert_approx_eq;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    /// A quad made of two triangles whose areas are 0.5 and 1.5.
    fn trapezoid() -> Shape {
        Shape {
            elements: Elements::Triangles(vec![[0, 1, 3], [1, 2, 3]]),
            vertices: VertexBuffers {
                pos: vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(3.0, 1.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                ],
                norm: vec![Vector3::unit_z(); 4],
                texcoord: vec![Vector2::new(0.0, 0.0); 4],
                ..Default::default()
            },
        }
    }

    #[test]
    fn area_weighted() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        let samples = sample_triangles(&mut rng, &trapezoid(), 10000);
        let small = samples.triangle.iter().filter(|t| **t == 0).count();
        let large = samples.len() - small;
        assert!((2300..=2700).contains(&small), "small: {}", small);
        assert!((7300..=7700).contains(&large), "large: {}", large);
    }

    #[test]
    fn deterministic() {
        let shape = quad(4, 4).unwrap();
        let a = sample_triangles(&mut Xoshiro256StarStar::seed_from_u64(7), &shape, 64);
        let b = sample_triangles(&mut Xoshiro256StarStar::seed_from_u64(7), &shape, 64);
        assert_eq!(a, b);
        for (p, n) in a.pos.iter().zip(&a.norm) {
            assert!(p.x.abs() <= 1.0 + 1e-6 && p.y.abs() <= 1.0 + 1e-6 && p.z == 0.0);
            assert_approx_eq!(f32, n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn no_triangles() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let points = Shape::empty(Elements::Points(vec![]));
        assert!(sample_triangles(&mut rng, &points, 10).is_empty());
    }
}
