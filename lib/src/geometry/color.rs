use std::ops::{Add, Mul};

/// Linear RGB color used by materials and procedural images.
///
/// Values are not clamped: emissive colors routinely exceed `1.0`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ColorRGB {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRGB {
    /// Creates a new color with the given `r`, `g` and `b` values.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        ColorRGB { r, g, b }
    }

    pub const fn gray(value: f32) -> Self {
        ColorRGB::new(value, value, value)
    }

    pub const fn black() -> Self {
        ColorRGB::gray(0.0)
    }

    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Encodes the color as 8-bit RGBA with the given alpha, clamping every channel.
    pub fn to_rgba8(self, alpha: f32) -> [u8; 4] {
        let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(alpha),
        ]
    }

    /// Converts from the Hue-Saturation-Value model, all components in `[0, 1]`.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        if s == 0.0 {
            return ColorRGB::gray(v);
        }
        let h = (h.fract() + 1.0).fract() * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u32 {
            0 => ColorRGB::new(v, t, p),
            1 => ColorRGB::new(q, v, p),
            2 => ColorRGB::new(p, v, t),
            3 => ColorRGB::new(p, q, v),
            4 => ColorRGB::new(t, p, v),
            _ => ColorRGB::new(v, p, q),
        }
    }
}

/// Converts an 8-bit sRGB triple into linear RGB, with the 2.2 gamma approximation.
pub fn srgb(r: u8, g: u8, b: u8) -> ColorRGB {
    let linear = |c: u8| (c as f32 / 255.0).powf(2.2);
    ColorRGB::new(linear(r), linear(g), linear(b))
}

/// Representation of a color in the CIE 1931 XYZ color space, with `Y` being the luminance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorXYZ {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ColorXYZ {
    /// Creates a new color with the given `x`, `y` and `z` values.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        ColorXYZ { x, y, z }
    }

    /// Creates a color from its chromaticity coordinates `(x, y)` and luminance `Y`.
    pub fn from_xyy(x: f32, y: f32, luminance: f32) -> Self {
        if y == 0.0 {
            return ColorXYZ::new(0.0, 0.0, 0.0);
        }
        ColorXYZ {
            x: x / y * luminance,
            y: luminance,
            z: (1.0 - x - y) / y * luminance,
        }
    }

    /// Converts to linear sRGB primaries (D65), without gamma encoding.
    pub fn to_linear_rgb(self) -> ColorRGB {
        let (x, y, z) = (self.x, self.y, self.z);
        ColorRGB {
            r: x * 3.2404542 + y * -1.5371385 + z * -0.4985314,
            g: x * -0.969266 + y * 1.8760108 + z * 0.0415560,
            b: x * 0.0556434 + y * -0.2040259 + z * 1.0572252,
        }
    }
}

impl Add<ColorRGB> for ColorRGB {
    type Output = ColorRGB;

    fn add(mut self, rhs: ColorRGB) -> Self::Output {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
        self
    }
}

impl Mul<ColorRGB> for ColorRGB {
    type Output = ColorRGB;

    fn mul(mut self, rhs: ColorRGB) -> Self::Output {
        self.r *= rhs.r;
        self.g *= rhs.g;
        self.b *= rhs.b;
        self
    }
}

impl Mul<f32> for ColorRGB {
    type Output = ColorRGB;

    fn mul(mut self, rhs: f32) -> Self::Output {
        self.r *= rhs;
        self.g *= rhs;
        self.b *= rhs;
        self
    }
}
