use crate::geometry::lookat_frame;
use cgmath::{MetricSpace, Matrix4, Point3, Vector3};

/// Camera of the flat scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera-to-world transformation. The camera looks along its local -z axis.
    pub frame: Matrix4<f32>,
    pub ortho: bool,
    /// Vertical field of view, in radians.
    pub yfov: f32,
    /// Width over height.
    pub aspect: f32,
    pub focus: f32,
    pub aperture: f32,
}

impl Camera {
    /// Creates a perspective camera looking from `eye` towards `target`, with the y axis up.
    ///
    /// `height` is the height of the film at unit distance, so that the field of view is
    /// `2·atan(height/2)`. The focus distance is the distance between `eye` and `target`.
    pub fn look_at(
        eye: Point3<f32>,
        target: Point3<f32>,
        height: f32,
        aperture: f32,
        aspect: f32,
    ) -> Self {
        Camera {
            frame: lookat_frame(eye, target, Vector3::unit_y()),
            ortho: false,
            yfov: 2.0 * (height / 2.0).atan(),
            aspect,
            focus: eye.distance(target),
            aperture,
        }
    }

    /// Horizontal field of view, in radians.
    pub fn xfov(&self) -> f32 {
        2.0 * ((self.yfov * 0.5).tan() * self.aspect).atan()
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use cgmath::Point3;
    use float_cmp::assert_approx_eq;

    #[test]
    fn look_at_parameters() {
        let camera = Camera::look_at(
            Point3::new(0.0, 3.0, 10.0),
            Point3::new(0.0, 0.0, 0.0),
            0.5,
            0.1,
            16.0 / 9.0,
        );
        assert_approx_eq!(f32, camera.yfov, 2.0 * 0.25_f32.atan());
        assert_approx_eq!(f32, camera.focus, 109.0_f32.sqrt());
        assert_approx_eq!(f32, camera.frame.w.y, 3.0);
        assert!(!camera.ortho);
    }

    #[test]
    fn yfov_to_xfov() {
        let camera = Camera::look_at(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
            2.0 * f32::to_radians(35.0).tan(),
            0.0,
            1.453,
        );
        assert_approx_eq!(f32, camera.yfov, f32::to_radians(70.0), epsilon = 1e-5);
        assert_approx_eq!(f32, camera.xfov(), f32::to_radians(91.0), epsilon = 1e-3);
    }
}
