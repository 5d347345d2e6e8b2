use super::sky::SkyModel;
use crate::config::{ENVMAP_HEIGHT, ENVMAP_WIDTH};
use crate::geometry::ColorRGB;
use cgmath::{InnerSpace, Vector3};
use image::Rgb32FImage;
use rayon::prelude::*;
use std::f32::consts::PI;

/// Parameters of a latitude-longitude sky map, with +z as the zenith.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvMapParams {
    pub width: u32,
    pub height: u32,
    /// Zenith angle of the sun, in radians.
    pub sun_theta: f32,
    pub turbidity: f32,
    /// Albedo of the ground, reflecting the sky at the horizon.
    pub ground: ColorRGB,
    /// Multiplier applied to every radiance value.
    pub scale: f32,
    /// When false, directions below the horizon are black.
    pub include_ground: bool,
}

impl Default for EnvMapParams {
    fn default() -> Self {
        EnvMapParams {
            width: ENVMAP_WIDTH,
            height: ENVMAP_HEIGHT,
            sun_theta: 0.8,
            turbidity: 8.0,
            ground: ColorRGB::gray(0.2),
            scale: 1.0 / 64.0,
            include_ground: true,
        }
    }
}

fn direction(phi: f32, theta: f32) -> Vector3<f32> {
    Vector3::new(phi.cos() * theta.sin(), phi.sin() * theta.sin(), theta.cos())
}

/// Evaluates `sky` at the centre of every pixel.
///
/// Rows are spread over the current rayon pool when `parallel` is set, otherwise they are
/// computed in order on the calling thread.
pub fn sky_envmap(sky: &dyn SkyModel, params: &EnvMapParams, parallel: bool) -> Rgb32FImage {
    let (width, height) = (params.width, params.height);
    let sun = direction(PI, params.sun_theta);
    let horizon = PI / 2.0 - 0.001;
    let fill_row = |(j, row): (usize, &mut [f32])| {
        let theta = PI * (j as f32 + 0.5) / height as f32;
        let below = theta > horizon;
        if below && !params.include_ground {
            return;
        }
        let theta = theta.min(horizon);
        for (i, pixel) in row.chunks_exact_mut(3).enumerate() {
            let phi = 2.0 * PI * (i as f32 + 0.5) / width as f32;
            let w = direction(phi, theta);
            let gamma = sun.dot(w).clamp(-1.0, 1.0).acos();
            let mut radiance = sky.rgb(theta, gamma) * params.scale;
            if below {
                radiance = radiance * params.ground;
            }
            pixel.copy_from_slice(&radiance.to_array());
        }
    };
    let mut img = Rgb32FImage::new(width, height);
    let stride = 3 * width as usize;
    if parallel {
        img.par_chunks_mut(stride).enumerate().for_each(fill_row);
    } else {
        img.chunks_mut(stride).enumerate().for_each(fill_row);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::{sky_envmap, EnvMapParams};
    use crate::geometry::ColorRGB;
    use crate::images::SkyModel;
    use float_cmp::assert_approx_eq;
    use rayon::ThreadPoolBuilder;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    struct Uniform;

    /// Records the threads evaluating the sky.
    #[derive(Default)]
    struct Recording(Mutex<HashSet<ThreadId>>);

    impl SkyModel for Recording {
        fn radiance(&self, _: f32, _: f32, _: usize) -> f32 {
            if let Ok(mut seen) = self.0.lock() {
                seen.insert(thread::current().id());
            }
            1.0
        }
    }

    impl SkyModel for Uniform {
        fn radiance(&self, _: f32, _: f32, _: usize) -> f32 {
            2.0
        }
    }

    fn small(include_ground: bool) -> EnvMapParams {
        EnvMapParams {
            width: 8,
            height: 4,
            ground: ColorRGB::gray(0.5),
            scale: 0.5,
            include_ground,
            ..Default::default()
        }
    }

    #[test]
    fn ground_reflects_the_horizon() {
        let img = sky_envmap(&Uniform, &small(true), true);
        assert_eq!(img.dimensions(), (8, 4));
        assert_approx_eq!(f32, img.get_pixel(3, 0)[0], 1.0);
        assert_approx_eq!(f32, img.get_pixel(3, 3)[1], 0.5);
    }

    #[test]
    fn no_ground() {
        let img = sky_envmap(&Uniform, &small(false), false);
        assert_approx_eq!(f32, img.get_pixel(5, 1)[2], 1.0);
        assert_approx_eq!(f32, img.get_pixel(5, 2)[2], 0.0);
    }

    #[test]
    fn sequential_stays_on_the_calling_thread() {
        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let params = EnvMapParams {
            width: 64,
            height: 32,
            ..Default::default()
        };
        let sequential = Recording::default();
        let caller = pool.install(|| {
            sky_envmap(&sequential, &params, false);
            thread::current().id()
        });
        let seen = sequential.0.into_inner().unwrap();
        assert_eq!(seen, HashSet::from([caller]));
        let parallel = Recording::default();
        let a = pool.install(|| sky_envmap(&parallel, &params, true));
        let b = sky_envmap(&parallel, &params, false);
        assert_eq!(a, b);
    }
}
