mod shape;
pub use self::shape::{Elements, Shape, VertexBuffers};
mod tessellate;
pub use self::tessellate::{make_lines, make_points, make_triangles};
mod merge;
pub use self::merge::{merge, merge_all};
mod distribution;
pub use self::distribution::Distribution1D;
mod frame;
pub use self::frame::{euler_rotation, lookat_frame, lookat_light_frame, Placement};
mod color;
pub use self::color::{srgb, ColorRGB, ColorXYZ};
