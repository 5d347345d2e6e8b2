use cgmath::{
    Deg, InnerSpace, Matrix4, Point3, Quaternion, Rotation3, SquareMatrix, Vector3, Vector4,
};

/// Builds a camera-to-world frame looking from `eye` towards `target`.
///
/// The local -z axis points at the target, as customary for cameras.
pub fn lookat_frame(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    let w = (eye - target).normalize();
    let u = up.cross(w).normalize();
    let v = w.cross(u);
    Matrix4::from_cols(
        u.extend(0.0),
        v.extend(0.0),
        w.extend(0.0),
        Vector4::new(eye.x, eye.y, eye.z, 1.0),
    )
}

/// Like [lookat_frame], but the local +z axis faces the target, so a quad emits towards it.
pub fn lookat_light_frame(
    eye: Point3<f32>,
    target: Point3<f32>,
    up: Vector3<f32>,
) -> Matrix4<f32> {
    let mut frame = lookat_frame(eye, target, up);
    frame.x = -frame.x;
    frame.z = -frame.z;
    frame
}

/// Rotation from angles in degrees, applied around x first, then y, then z.
pub fn euler_rotation(degrees: Vector3<f32>) -> Quaternion<f32> {
    Quaternion::from_angle_z(Deg(degrees.z))
        * Quaternion::from_angle_y(Deg(degrees.y))
        * Quaternion::from_angle_x(Deg(degrees.x))
}

/// Placement of an instance or node in the world.
///
/// Exactly one representation is meaningful at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Trs {
        translation: Vector3<f32>,
        rotation: Quaternion<f32>,
        scale: Vector3<f32>,
    },
    Matrix(Matrix4<f32>),
}

impl Placement {
    pub fn identity() -> Self {
        Placement::translation(Vector3::new(0.0, 0.0, 0.0))
    }

    pub fn translation(translation: Vector3<f32>) -> Self {
        Placement::Trs {
            translation,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Translation followed by a rotation expressed as euler angles in degrees.
    pub fn euler(translation: Vector3<f32>, degrees: Vector3<f32>) -> Self {
        Placement::Trs {
            translation,
            rotation: euler_rotation(degrees),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Returns the equivalent affine matrix, computed as `T * R * S` for the TRS variant.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        match self {
            Placement::Trs {
                translation,
                rotation,
                scale,
            } => {
                Matrix4::from_translation(*translation)
                    * Matrix4::from(*rotation)
                    * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
            }
            Placement::Matrix(m) => *m,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.to_matrix() == Matrix4::identity()
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement::identity()
    }
}
