use super::{GraphCamera, GraphScene};
use crate::config::{CAMERA_FAR, CAMERA_NEAR, DEFAULT_ASPECT};
use crate::geometry::lookat_frame;
use cgmath::{Matrix4, MetricSpace, Point3, Vector3};

/// A camera generated for a scene that has none, with its camera-to-world frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCamera {
    pub name: String,
    pub camera: GraphCamera,
    pub frame: Matrix4<f32>,
}

/// Decides which cameras to add to a converted scene whose source declares none.
pub trait DefaultCameraPolicy {
    fn default_cameras(&self, scene: &GraphScene) -> Vec<PlacedCamera>;
}

/// Frames the whole scene from the +z side with a single perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingCamera {
    pub yfov: f32,
    pub aspect: f32,
    /// Multiplier of the distance needed to fit the largest side of the bounding box.
    pub margin: f32,
}

impl Default for FramingCamera {
    fn default() -> Self {
        FramingCamera {
            yfov: 2.0 * 0.5_f32.atan(),
            aspect: DEFAULT_ASPECT,
            margin: 1.5,
        }
    }
}

impl DefaultCameraPolicy for FramingCamera {
    fn default_cameras(&self, scene: &GraphScene) -> Vec<PlacedCamera> {
        let (min, max) = scene
            .bounds()
            .unwrap_or((Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)));
        let center = Point3::new(
            (min.x + max.x) * 0.5,
            (min.y + max.y) * 0.5,
            (min.z + max.z) * 0.5,
        );
        let size = max - min;
        let extent = size.x.max(size.y).max(size.z).max(f32::EPSILON);
        let distance = self.margin * extent * 0.5 / (self.yfov * 0.5).tan();
        let eye = center + Vector3::new(0.0, 0.0, size.z * 0.5 + distance);
        vec![PlacedCamera {
            name: "default_camera".to_string(),
            camera: GraphCamera {
                ortho: false,
                yfov: self.yfov,
                aspect: self.aspect,
                focus: eye.distance(center),
                aperture: 0.0,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
            },
            frame: lookat_frame(eye, center, Vector3::unit_y()),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultCameraPolicy, FramingCamera};
    use crate::graph::GraphScene;
    use float_cmp::assert_approx_eq;

    #[test]
    fn frames_empty_scene() {
        let cameras = FramingCamera::default().default_cameras(&GraphScene::default());
        assert_eq!(cameras.len(), 1);
        let cam = &cameras[0];
        // unit box: extent 2, tan(yfov/2) = 0.5, distance 3 plus half depth
        assert_approx_eq!(f32, cam.frame.w.z, 4.0, epsilon = 1e-5);
        assert_approx_eq!(f32, cam.camera.focus, 4.0, epsilon = 1e-5);
        assert_approx_eq!(f32, cam.frame.z.z, 1.0, epsilon = 1e-6);
        assert_approx_eq!(f32, cam.camera.near, 0.1);
    }
}
