use super::{compute_normals, sample_triangles};
use crate::config::GUIDE_STRANDS;
use crate::geometry::{make_lines, Shape};
use cgmath::{EuclideanSpace, Matrix3, MetricSpace, Point3, Rad, Vector2, Vector3};
use rand::Rng;
use std::f32::consts::PI;

/// Shaping parameters of [fibers].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FiberParams {
    pub strands: usize,
    pub segments: usize,
    /// Amplitude of the random per-vertex offset.
    pub jitter: f32,
    /// Pull of non-guide strands towards their nearest guide, at the tip.
    pub clump: f32,
    /// Rotation around the y axis, in radians, at the tip.
    pub twist: f32,
}

struct Strand {
    base: Vector3<f32>,
    length: f32,
}

impl Strand {
    fn position(&self, u: f32) -> Vector3<f32> {
        self.base * (1.0 + u * self.length)
    }
}

/// Returns, for every strand, the index of the nearest guide by distance between base points.
///
/// Guides themselves map to `None`. Ties keep the lowest guide index.
fn nearest_guides(strands: &[Strand], guides: usize) -> Vec<Option<usize>> {
    let guides = &strands[..guides.min(strands.len())];
    strands
        .iter()
        .enumerate()
        .map(|(idx, strand)| {
            if idx < guides.len() {
                return None;
            }
            let base = Point3::from_vec(strand.base);
            let mut nearest = None;
            let mut min_dist = f32::INFINITY;
            for (k, guide) in guides.iter().enumerate() {
                let dist = base.distance(Point3::from_vec(guide.base));
                if dist < min_dist {
                    min_dist = dist;
                    nearest = Some(k);
                }
            }
            nearest
        })
        .collect()
}

/// Generates strands growing radially out of the unit sphere.
///
/// Each strand starts at a random point of the sphere and grows for a random length. The
/// position is then jittered, twisted around the y axis and clumped towards the nearest of the
/// first [GUIDE_STRANDS] strands, in this order. Normals hold the strand tangents.
pub fn fibers<R: Rng>(rng: &mut R, params: &FiberParams) -> Shape {
    let FiberParams {
        strands: num,
        segments,
        jitter,
        clump,
        twist,
    } = *params;
    let strands = (0..num)
        .map(|_| {
            let z = -1.0 + 2.0 * rng.gen::<f32>();
            let r = (1.0 - z * z).clamp(0.0, 1.0).sqrt();
            let phi = 2.0 * PI * rng.gen::<f32>();
            let length = 0.15 + 0.15 * rng.gen::<f32>();
            Strand {
                base: Vector3::new(r * phi.cos(), r * phi.sin(), z),
                length,
            }
        })
        .collect::<Vec<_>>();
    let guides = if clump != 0.0 {
        nearest_guides(&strands, GUIDE_STRANDS)
    } else {
        Vec::new()
    };
    let mut shape = make_lines(
        num,
        segments,
        |idx, u| {
            let strand = &strands[idx];
            let mut pos = strand.position(u);
            if jitter != 0.0 {
                pos += Vector3::new(
                    jitter * (0.5 - rng.gen::<f32>()),
                    jitter * (0.5 - rng.gen::<f32>()),
                    jitter * (0.5 - rng.gen::<f32>()),
                );
            }
            if twist != 0.0 && u != 0.0 {
                pos = Matrix3::from_angle_y(Rad(twist * u * u)) * pos;
            }
            if let Some(Some(guide)) = guides.get(idx) {
                let weight = clump * u * u;
                pos = pos * (1.0 - weight) + strands[*guide].position(u) * weight;
            }
            Point3::from_vec(pos)
        },
        |_, _| Vector3::unit_z(),
        |idx, u| Vector2::new(u, idx as f32 / num as f32),
        |_, u| 0.001 + 0.001 * (1.0 - u),
    );
    compute_normals(&mut shape);
    shape
}

/// Parameters of [hair].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HairParams {
    pub strands: usize,
    pub segments: usize,
    pub length: f32,
}

/// Grows straight strands along the normal of points sampled on the triangles of `surface`.
///
/// Radius shrinks linearly from 0.01 at the root to 0 at the tip. Non-triangle surfaces
/// yield an empty shape.
pub fn hair<R: Rng>(rng: &mut R, surface: &Shape, params: &HairParams) -> Shape {
    let samples = sample_triangles(rng, surface, params.strands);
    let num = samples.len();
    let length = params.length;
    make_lines(
        num,
        params.segments,
        |idx, u| samples.pos[idx] + samples.norm[idx] * u * length,
        |idx, _| samples.norm[idx],
        |idx, u| Vector2::new(u, idx as f32 / num as f32),
        |_, u| 0.01 * (1.0 - u),
    )
}
