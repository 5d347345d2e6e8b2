use crate::geometry::{ColorRGB, ColorXYZ};

/// Analytic sky radiance.
///
/// Angles are in radians: `theta` is the zenith angle of the view direction and `gamma` the angle
/// between the view direction and the sun.
pub trait SkyModel: Sync {
    /// Radiance of a single linear RGB channel (`0` red, `1` green, `2` blue).
    fn radiance(&self, theta: f32, gamma: f32, channel: usize) -> f32;

    /// Radiance of all the channels at once.
    fn rgb(&self, theta: f32, gamma: f32) -> ColorRGB {
        ColorRGB::new(
            self.radiance(theta, gamma, 0),
            self.radiance(theta, gamma, 1),
            self.radiance(theta, gamma, 2),
        )
    }
}

/// Coefficients `A` to `E` of the Perez sky distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Perez([f32; 5]);

impl Perez {
    fn new(turbidity: f32, coeffs: [[f32; 2]; 5]) -> Self {
        Perez(coeffs.map(|[t, c]| t * turbidity + c))
    }

    fn eval(&self, theta: f32, gamma: f32) -> f32 {
        let [a, b, c, d, e] = self.0;
        let cos_gamma = gamma.cos();
        (1.0 + a * (b / theta.cos().max(1e-3)).exp())
            * (1.0 + c * (d * gamma).exp() + e * cos_gamma * cos_gamma)
    }
}

/// Clear sky model of Preetham, Shirley and Smits, "A Practical Analytic Model for Daylight".
///
/// Luminance is expressed in kcd/m^2.
#[derive(Debug, Clone, PartialEq)]
pub struct PreethamSky {
    luminance: Perez,
    x: Perez,
    y: Perez,
    /// Zenith values divided by the distribution value at the zenith.
    zenith: [f32; 3],
}

impl PreethamSky {
    /// Creates the sky for the given atmospheric `turbidity` (usually between 2 and 10) and sun
    /// zenith angle.
    pub fn new(turbidity: f32, sun_theta: f32) -> Self {
        let t = turbidity;
        let luminance = Perez::new(
            t,
            [
                [0.1787, -1.4630],
                [-0.3554, 0.4275],
                [-0.0227, 5.3251],
                [0.1206, -2.5771],
                [-0.0670, 0.3703],
            ],
        );
        let x = Perez::new(
            t,
            [
                [-0.0193, -0.2592],
                [-0.0665, 0.0008],
                [-0.0004, 0.2125],
                [-0.0641, -0.8989],
                [-0.0033, 0.0452],
            ],
        );
        let y = Perez::new(
            t,
            [
                [-0.0167, -0.2608],
                [-0.0950, 0.0092],
                [-0.0079, 0.2102],
                [-0.0441, -1.6537],
                [-0.0109, 0.0529],
            ],
        );
        let s = sun_theta;
        let (s2, s3) = (s * s, s * s * s);
        let chi = (4.0 / 9.0 - t / 120.0) * (std::f32::consts::PI - 2.0 * s);
        let zenith_luminance = (4.0453 * t - 4.9710) * chi.tan() - 0.2155 * t + 2.4192;
        let zenith_x = t * t * (0.00166 * s3 - 0.00375 * s2 + 0.00209 * s)
            + t * (-0.02903 * s3 + 0.06377 * s2 - 0.03202 * s + 0.00394)
            + (0.11693 * s3 - 0.21196 * s2 + 0.06052 * s + 0.25886);
        let zenith_y = t * t * (0.00275 * s3 - 0.00610 * s2 + 0.00317 * s)
            + t * (-0.04214 * s3 + 0.08970 * s2 - 0.04153 * s + 0.00516)
            + (0.15346 * s3 - 0.26756 * s2 + 0.06670 * s + 0.26688);
        let zenith = [
            zenith_luminance / luminance.eval(0.0, s),
            zenith_x / x.eval(0.0, s),
            zenith_y / y.eval(0.0, s),
        ];
        PreethamSky {
            luminance,
            x,
            y,
            zenith,
        }
    }
}

impl SkyModel for PreethamSky {
    fn radiance(&self, theta: f32, gamma: f32, channel: usize) -> f32 {
        self.rgb(theta, gamma).to_array()[channel.min(2)]
    }

    fn rgb(&self, theta: f32, gamma: f32) -> ColorRGB {
        let luminance = self.zenith[0] * self.luminance.eval(theta, gamma);
        let x = self.zenith[1] * self.x.eval(theta, gamma);
        let y = self.zenith[2] * self.y.eval(theta, gamma);
        ColorXYZ::from_xyy(x, y, luminance).to_linear_rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::{PreethamSky, SkyModel};
    use float_cmp::assert_approx_eq;

    #[test]
    fn brighter_towards_the_sun() {
        let sky = PreethamSky::new(8.0, 0.8);
        let near = sky.rgb(0.8, 0.05);
        let far = sky.rgb(0.8, 2.5);
        assert!(near.g > far.g);
        assert!(far.r > 0.0 && far.g > 0.0 && far.b > 0.0);
    }

    #[test]
    fn clear_sky_is_blue() {
        let sky = PreethamSky::new(2.0, 0.5);
        let zenith = sky.rgb(0.0, 0.5);
        assert!(zenith.b > zenith.r);
    }

    #[test]
    fn channels_match_rgb() {
        let sky = PreethamSky::new(4.0, 1.0);
        let rgb = sky.rgb(0.7, 1.2);
        assert_approx_eq!(f32, sky.radiance(0.7, 1.2, 0), rgb.r);
        assert_approx_eq!(f32, sky.radiance(0.7, 1.2, 2), rgb.b);
    }
}
