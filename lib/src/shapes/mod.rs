//! Shape generators built on top of the grid tessellator.
//!
//! Every generator returns a standalone [Shape](crate::geometry::Shape) centered in the origin;
//! stochastic generators take the random number generator explicitly.
mod normals;
pub use self::normals::compute_normals;
mod primitives;
pub use self::primitives::{
    cube, flipcap_sphere, quad, random_points, single_point, sphere_cube, spherized_cube,
    uv_sphere,
};
mod cutsphere;
pub use self::cutsphere::{
    cut_sphere, flipped_cut_sphere, hollow_cut_sphere, hollow_cut_sphere_capped,
};
mod floor;
pub use self::floor::{floor, FloorParams};
mod sampling;
pub use self::sampling::{sample_triangles, SurfaceSamples};
mod fibers;
pub use self::fibers::{fibers, hair, FiberParams, HairParams};
