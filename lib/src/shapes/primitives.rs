use super::compute_normals;
use crate::error::InvariantError;
use crate::geometry::{
    make_points, make_triangles, merge, Elements, Shape, VertexBuffers,
};
use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector2, Vector3};
use rand::Rng;
use std::f32::consts::PI;

/// Square in the z=0 plane spanning `[-1, 1]²`, facing +z.
pub fn quad(usteps: usize, vsteps: usize) -> Result<Shape, InvariantError> {
    make_triangles(
        usteps,
        vsteps,
        |uv| Point3::new(-1.0 + 2.0 * uv.x, -1.0 + 2.0 * uv.y, 0.0),
        |_| Vector3::unit_z(),
        |uv| Vector2::new(uv.x, 1.0 - uv.y),
    )
}

// (x axis, y axis, origin) of each face, z being x cross y
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, -1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    ([0.0, -1.0, 0.0], [0.0, 0.0, 1.0], [-1.0, 0.0, 0.0]),
];

/// Cube spanning `[-1, 1]³`, made of six tessellated quads with per-face normals.
pub fn cube(usteps: usize, vsteps: usize) -> Result<Shape, InvariantError> {
    let face = quad(usteps, vsteps)?;
    let mut cube = Shape::empty(Elements::Triangles(Vec::new()));
    for (x, y, o) in CUBE_FACES.iter() {
        let x = Vector3::from(*x);
        let y = Vector3::from(*y);
        let o = Vector3::from(*o);
        let z = x.cross(y);
        let mut placed = face.clone();
        for p in placed.vertices.pos.iter_mut() {
            *p = Point3::from_vec(x * p.x + y * p.y + o);
        }
        placed.vertices.norm.iter_mut().for_each(|n| *n = z);
        merge(&mut cube, &placed)?;
    }
    Ok(cube)
}

fn sphere_point(phi: f32, theta: f32) -> Vector3<f32> {
    Vector3::new(phi.cos() * theta.sin(), phi.sin() * theta.sin(), theta.cos())
}

/// Unit sphere with poles on the z axis.
pub fn uv_sphere(usteps: usize, vsteps: usize) -> Result<Shape, InvariantError> {
    let dir = |uv: Vector2<f32>| sphere_point(2.0 * PI * uv.x, PI * (1.0 - uv.y));
    make_triangles(
        usteps,
        vsteps,
        |uv| Point3::from_vec(dir(uv)),
        dir,
        |uv| uv,
    )
}

/// Unit sphere whose caps beyond `|z|` are mirrored inwards.
pub fn flipcap_sphere(usteps: usize, vsteps: usize, z: f32) -> Result<Shape, InvariantError> {
    let mut shape = uv_sphere(usteps, vsteps)?;
    let VertexBuffers { pos, norm, .. } = &mut shape.vertices;
    for (p, n) in pos.iter_mut().zip(norm.iter_mut()) {
        if p.z > z {
            p.z = 2.0 * z - p.z;
            n.x = -n.x;
            n.y = -n.y;
        } else if p.z < -z {
            p.z = -2.0 * z - p.z;
            n.x = -n.x;
            n.y = -n.y;
        }
    }
    Ok(shape)
}

/// Cube with positions projected on the unit sphere.
pub fn sphere_cube(usteps: usize, vsteps: usize) -> Result<Shape, InvariantError> {
    let mut shape = cube(usteps, vsteps)?;
    let VertexBuffers { pos, norm, .. } = &mut shape.vertices;
    for (p, n) in pos.iter_mut().zip(norm.iter_mut()) {
        let dir = p.to_vec().normalize();
        *p = Point3::from_vec(dir);
        *n = dir;
    }
    Ok(shape)
}

/// Cube moved towards the unit sphere by `radius` (0 is a cube, 1 a sphere).
pub fn spherized_cube(
    usteps: usize,
    vsteps: usize,
    radius: f32,
) -> Result<Shape, InvariantError> {
    let mut shape = cube(usteps, vsteps)?;
    for p in shape.vertices.pos.iter_mut() {
        let v = p.to_vec();
        *p = Point3::from_vec(v * (1.0 - radius) + v.normalize() * radius);
    }
    compute_normals(&mut shape);
    Ok(shape)
}

/// A single point at the origin.
pub fn single_point(radius: f32) -> Shape {
    Shape {
        elements: Elements::Points(vec![0]),
        vertices: VertexBuffers {
            pos: vec![Point3::origin()],
            norm: vec![Vector3::unit_z()],
            texcoord: vec![Vector2::new(0.0, 0.0)],
            color: Vec::new(),
            radius: vec![radius],
        },
    }
}

/// `count` points uniformly distributed in `[-1, 1]³`.
pub fn random_points<R: Rng>(rng: &mut R, count: usize) -> Result<Shape, InvariantError> {
    make_points(
        count,
        |_, _| {
            Point3::new(
                -1.0 + 2.0 * rng.gen::<f32>(),
                -1.0 + 2.0 * rng.gen::<f32>(),
                -1.0 + 2.0 * rng.gen::<f32>(),
            )
        },
        |_, _| Vector3::unit_z(),
        |_, u| Vector2::new(u, 0.0),
        |_, _| 0.0025,
    )
}

#[cfg(test)]
mod tests {
    use super::{cube, flipcap_sphere, quad, random_points, sphere_cube, spherized_cube, uv_sphere};
    use crate::geometry::Shape;
    use cgmath::{EuclideanSpace, InnerSpace};
    use float_cmp::assert_approx_eq;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    /// Checks that every triangle's geometric normal agrees with its vertex normals.
    fn outward(shape: &Shape) -> bool {
        let pos = &shape.vertices.pos;
        let norm = &shape.vertices.norm;
        shape.triangles().iter().all(|t| {
            let (a, b, c) = (pos[t[0] as usize], pos[t[1] as usize], pos[t[2] as usize]);
            let geometric = (b - a).cross(c - a);
            if geometric.magnitude2() < 1e-12 {
                return true;
            }
            let avg = norm[t[0] as usize] + norm[t[1] as usize] + norm[t[2] as usize];
            geometric.dot(avg) > 0.0
        })
    }

    #[test]
    fn quad_layout() {
        let q = quad(2, 2).unwrap();
        assert_eq!(q.vertex_count(), 9);
        assert_approx_eq!(f32, q.vertices.pos[0].x, -1.0);
        assert_approx_eq!(f32, q.vertices.pos[8].y, 1.0);
        assert_approx_eq!(f32, q.vertices.texcoord[0].y, 1.0);
        assert!(outward(&q));
    }

    #[test]
    fn cube_faces() {
        let c = cube(2, 3).unwrap();
        assert_eq!(c.vertex_count(), 6 * 12);
        assert_eq!(c.triangles().len(), 6 * 12);
        assert!(c.is_valid());
        assert!(outward(&c));
        for p in &c.vertices.pos {
            let max = p.x.abs().max(p.y.abs()).max(p.z.abs());
            assert_approx_eq!(f32, max, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn spheres_are_unit() {
        for shape in [uv_sphere(16, 8).unwrap(), sphere_cube(4, 4).unwrap()] {
            assert!(outward(&shape));
            for p in &shape.vertices.pos {
                assert_approx_eq!(f32, p.to_vec().magnitude(), 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn flipcap_stays_inside_slab() {
        let shape = flipcap_sphere(16, 8, 0.75).unwrap();
        for p in &shape.vertices.pos {
            assert!(p.z.abs() <= 0.75 + 1e-6);
        }
    }

    #[test]
    fn spherized_between_cube_and_sphere() {
        let shape = spherized_cube(4, 4, 0.75).unwrap();
        assert!(outward(&shape));
        for p in &shape.vertices.pos {
            let r = p.to_vec().magnitude();
            assert!((1.0 - 1e-5..=3.0_f32.sqrt()).contains(&r));
        }
    }

    #[test]
    fn points_in_box() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let shape = random_points(&mut rng, 1000).unwrap();
        assert_eq!(shape.vertex_count(), 1000);
        assert!(shape.vertices.pos.iter().all(|p| p.x.abs() <= 1.0
            && p.y.abs() <= 1.0
            && p.z.abs() <= 1.0));
        let mut again = Xoshiro256StarStar::seed_from_u64(1);
        assert_eq!(random_points(&mut again, 1000).unwrap(), shape);
    }
}
