use crate::error::InvariantError;
use crate::geometry::{make_triangles, merge_all, Shape};
use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector2, Vector3};
use std::f32::consts::PI;

fn direction(phi: f32, theta: f32) -> Vector3<f32> {
    Vector3::new(phi.cos() * theta.sin(), phi.sin() * theta.sin(), theta.cos())
}

/// Fraction of the v range kept by a sphere cut at height `z`.
fn kept_fraction(z: f32) -> f32 {
    1.0 - z.clamp(-1.0, 1.0).acos() / PI
}

/// Unit sphere with the part above height `z` removed, facing outwards.
pub fn cut_sphere(usteps: usize, vsteps: usize, z: f32) -> Result<Shape, InvariantError> {
    let p = kept_fraction(z);
    let dir = move |uv: Vector2<f32>| direction(2.0 * PI * uv.x, PI * (1.0 - p * uv.y));
    make_triangles(
        usteps,
        vsteps,
        |uv| Point3::from_vec(dir(uv)),
        dir,
        |uv| Vector2::new(uv.x, p * uv.y),
    )
}

/// Same surface of [cut_sphere], facing inwards.
pub fn flipped_cut_sphere(
    usteps: usize,
    vsteps: usize,
    z: f32,
) -> Result<Shape, InvariantError> {
    let p = kept_fraction(z);
    let dir = move |uv: Vector2<f32>| direction(2.0 * PI * (1.0 - uv.x), PI * (1.0 - p * uv.y));
    make_triangles(
        usteps,
        vsteps,
        |uv| Point3::from_vec(dir(uv)),
        |uv| -dir(uv),
        |uv| Vector2::new(uv.x, p * uv.y),
    )
}

/// Shell made of an outer cut sphere, an inner one scaled by `radius` and the rim joining them.
///
/// `radius` is also the cut height.
pub fn hollow_cut_sphere(
    usteps: usize,
    vsteps: usize,
    radius: f32,
) -> Result<Shape, InvariantError> {
    let mut outer = cut_sphere(usteps, vsteps, radius)?;
    outer
        .vertices
        .texcoord
        .iter_mut()
        .for_each(|uv| uv.y *= radius);
    let mut inner = flipped_cut_sphere(usteps, vsteps, radius)?;
    inner.scale(radius);
    let theta = radius.clamp(-1.0, 1.0).acos();
    let rim = make_triangles(
        usteps,
        vsteps,
        |uv| {
            let r = (1.0 - uv.y) + uv.y * radius;
            Point3::from_vec(direction(2.0 * PI * uv.x, theta) * r)
        },
        |uv| {
            let phi = 2.0 * PI * uv.x;
            Vector3::new(
                -phi.cos() * theta.cos(),
                -phi.sin() * theta.cos(),
                theta.sin(),
            )
        },
        |uv| Vector2::new(uv.x, radius + (1.0 - radius) * uv.y),
    )?;
    merge_all([&outer, &inner, &rim])
}

/// Second variant of the hollow cut sphere: smoothed rim normals, a thinner inner shell and a
/// concave cap closing the opening.
pub fn hollow_cut_sphere_capped(
    usteps: usize,
    vsteps: usize,
    radius: f32,
) -> Result<Shape, InvariantError> {
    let smooth = |n: &mut Vector3<f32>| *n = (*n + Vector3::unit_z()).normalize();
    let mut outer = cut_sphere(usteps, vsteps, radius)?;
    outer
        .vertices
        .texcoord
        .iter_mut()
        .for_each(|uv| uv.y *= radius);
    // last row is the cut edge
    let edge = (usteps + 1) * vsteps;
    outer.vertices.norm[edge..].iter_mut().for_each(smooth);
    let mut inner = flipped_cut_sphere(usteps, vsteps, (radius * 1.05).min(1.0))?;
    inner.scale(0.8);
    let p = kept_fraction(radius);
    let angles = move |uv: Vector2<f32>| {
        let v = p + uv.y * (1.0 - p);
        (2.0 * PI * uv.x, PI * (1.0 - v))
    };
    let mut cap = make_triangles(
        usteps,
        (vsteps / 4).max(1),
        |uv| {
            let (phi, theta) = angles(uv);
            Point3::new(
                phi.cos() * theta.sin(),
                phi.sin() * theta.sin(),
                2.0 * radius - theta.cos(),
            )
        },
        |uv| {
            let (phi, theta) = angles(uv);
            Vector3::new(
                -phi.cos() * theta.sin(),
                -phi.sin() * theta.sin(),
                theta.cos(),
            )
        },
        |uv| Vector2::new(uv.x, radius + (1.0 - radius) * uv.y),
    )?;
    cap.vertices.norm[..=usteps].iter_mut().for_each(smooth);
    merge_all([&outer, &inner, &cap])
}
