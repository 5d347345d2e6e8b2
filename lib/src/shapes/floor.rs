use super::compute_normals;
use crate::error::InvariantError;
use crate::geometry::{make_triangles, Shape};
use cgmath::{Point3, Vector3};

/// Parameters of the warped floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorParams {
    /// Repetitions of the texture over the whole floor.
    pub texture_scale: f32,
    /// Exponent of the curved back; 0 keeps the floor flat.
    pub power: f32,
    /// The floor is tessellated with `2^level` steps per side.
    pub level: u32,
    /// Half size of the floor.
    pub scale: f32,
}

impl Default for FloorParams {
    fn default() -> Self {
        FloorParams {
            texture_scale: 6.0,
            power: 4.0,
            level: 6,
            scale: 12.0,
        }
    }
}

/// Floor in the xz plane facing +y, whose back half bends upwards as `(-z)^power`.
pub fn floor(params: &FloorParams) -> Result<Shape, InvariantError> {
    let steps = 1_usize << params.level;
    let FloorParams {
        texture_scale,
        power,
        scale,
        ..
    } = *params;
    let mut shape = make_triangles(
        steps,
        steps,
        |uv| {
            let x = 2.0 * uv.x - 1.0;
            let y = 1.0 - 2.0 * uv.y;
            let height = if y >= 0.0 || power == 0.0 {
                0.0
            } else {
                (-y).powf(power)
            };
            Point3::new(x * scale, height * scale, y * scale)
        },
        |_| Vector3::unit_y(),
        |uv| uv * texture_scale,
    )?;
    if power != 0.0 {
        compute_normals(&mut shape);
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::{floor, FloorParams};
    use float_cmp::assert_approx_eq;

    #[test]
    fn flat_floor() {
        let params = FloorParams {
            texture_scale: 12.0,
            power: 0.0,
            level: 0,
            scale: 120.0,
        };
        let shape = floor(&params).unwrap();
        assert_eq!(shape.vertex_count(), 4);
        assert_eq!(shape.triangles().len(), 2);
        for (p, n) in shape.vertices.pos.iter().zip(&shape.vertices.norm) {
            assert_approx_eq!(f32, p.y, 0.0);
            assert_approx_eq!(f32, p.x.abs(), 120.0);
            assert_approx_eq!(f32, n.y, 1.0);
        }
        assert_approx_eq!(f32, shape.vertices.texcoord[3].x, 12.0);
    }

    #[test]
    fn curved_back() {
        let shape = floor(&FloorParams::default()).unwrap();
        let steps = 1 << 6;
        assert_eq!(shape.vertex_count(), (steps + 1) * (steps + 1));
        let back = shape.vertices.pos.last().unwrap();
        assert_approx_eq!(f32, back.z, -12.0);
        assert_approx_eq!(f32, back.y, 12.0);
        for n in &shape.vertices.norm {
            assert!(n.y > 0.0);
        }
    }
}
