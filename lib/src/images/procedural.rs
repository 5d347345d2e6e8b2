use crate::geometry::ColorRGB;
use image::{Rgb, Rgb32FImage, Rgba, RgbaImage};

const DARK: Rgba<u8> = Rgba([90, 90, 90, 255]);
const LIGHT: Rgba<u8> = Rgba([128, 128, 128, 255]);
const GAMMA: f32 = 2.2;

/// Light tiles of side `tile` separated by dark, one pixel wide lines.
pub fn grid(size: u32, tile: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |i, j| {
        let border = |x: u32| x % tile == 0 || x % tile == tile - 1;
        if border(i) || border(j) {
            DARK
        } else {
            LIGHT
        }
    })
}

pub fn checker(size: u32, tile: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |i, j| {
        if (i / tile + j / tile) % 2 == 0 {
            DARK
        } else {
            LIGHT
        }
    })
}

/// Hue of the tile containing pixel `(i, j)`: it changes along both axes so that every tile is
/// distinguishable from its neighbours.
fn tile_hue(i: u32, j: u32, tile: u32) -> f32 {
    ((i / tile + 3 * (j / tile)) % 8) as f32 / 8.0
}

/// Checks split in four by a sub-checker, with a colored hue per tile.
///
/// Used to spot stretched or flipped texture coordinates.
pub fn uv_grid(size: u32, tile: u32, colored: bool) -> RgbaImage {
    let half = (tile / 2).max(1);
    RgbaImage::from_fn(size, size, |i, j| {
        let saturation = if colored { 0.8 } else { 0.0 };
        let mut value = if ((i / half) + (j / half)) % 2 == 0 {
            0.6
        } else {
            0.8
        };
        if i % tile == 0 || j % tile == 0 {
            value = 0.4;
        }
        let color = ColorRGB::from_hsv(tile_hue(i, j, tile), saturation, value);
        Rgba(color.to_rgba8(1.0))
    })
}

/// Like [uv_grid], but lines are drawn at every power-of-two subdivision of the tile, fainter the
/// finer the subdivision.
pub fn recursive_uv_grid(size: u32, tile: u32, colored: bool) -> RgbaImage {
    RgbaImage::from_fn(size, size, |i, j| {
        let saturation = if colored { 0.8 } else { 0.0 };
        let mut value = 0.9;
        let mut step = tile;
        let mut line = 0.3;
        while step >= 4 {
            if i % step == 0 || j % step == 0 {
                value = line;
                break;
            }
            step /= 2;
            line += 0.15;
        }
        let color = ColorRGB::from_hsv(tile_hue(i, j, tile), saturation, value);
        Rgba(color.to_rgba8(1.0))
    })
}

/// Value of the gamma ramp at column `u`, row `v`, both in `[0, 1)`.
///
/// The top third is gamma encoded, the middle third linear and the bottom third gamma decoded.
fn ramp(u: f32, v: f32) -> f32 {
    if v < 1.0 / 3.0 {
        u.powf(1.0 / GAMMA)
    } else if v < 2.0 / 3.0 {
        u
    } else {
        u.powf(GAMMA)
    }
}

pub fn gamma_ramp(size: u32) -> RgbaImage {
    let s = size as f32;
    RgbaImage::from_fn(size, size, |i, j| {
        let value = ramp(i as f32 / s, j as f32 / s);
        Rgba(ColorRGB::gray(value).to_rgba8(1.0))
    })
}

pub fn gamma_ramp_float(size: u32) -> Rgb32FImage {
    let s = size as f32;
    Rgb32FImage::from_fn(size, size, |i, j| {
        let value = ramp(i as f32 / s, j as f32 / s);
        Rgb([value; 3])
    })
}

/// Derives a tangent-space normal map from the luminance of `bump`.
///
/// Slopes are computed with central differences, wrapping around the borders.
pub fn bump_to_normal(bump: &RgbaImage, scale: f32) -> RgbaImage {
    let (width, height) = bump.dimensions();
    let height_at = |i: u32, j: u32| {
        let p = bump.get_pixel(i % width, j % height);
        (p[0] as f32 + p[1] as f32 + p[2] as f32) / (3.0 * 255.0)
    };
    RgbaImage::from_fn(width, height, |i, j| {
        let du = (height_at(i + 1, j) - height_at(i + width - 1, j)) * 0.5;
        // image rows grow downwards, texture v grows upwards
        let dv = (height_at(i, j + height - 1) - height_at(i, j + 1)) * 0.5;
        let (nx, ny, nz) = (-scale * du, -scale * dv, 1.0);
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let encode = |c: f32| c / len * 0.5 + 0.5;
        Rgba(ColorRGB::new(encode(nx), encode(ny), encode(nz)).to_rgba8(1.0))
    })
}

#[cfg(test)]
mod tests {
    use super::{bump_to_normal, checker, gamma_ramp, gamma_ramp_float, grid, recursive_uv_grid};
    use super::{uv_grid, DARK, LIGHT};
    use float_cmp::assert_approx_eq;
    use image::{Rgba, RgbaImage};

    #[test]
    fn grid_lines() {
        let img = grid(128, 64);
        assert_eq!(*img.get_pixel(0, 10), DARK);
        assert_eq!(*img.get_pixel(63, 10), DARK);
        assert_eq!(*img.get_pixel(64, 10), DARK);
        assert_eq!(*img.get_pixel(10, 10), LIGHT);
    }

    #[test]
    fn checker_alternates() {
        let img = checker(128, 64);
        assert_eq!(*img.get_pixel(0, 0), DARK);
        assert_eq!(*img.get_pixel(64, 0), LIGHT);
        assert_eq!(*img.get_pixel(64, 64), DARK);
    }

    #[test]
    fn uncolored_grids_are_gray() {
        for img in [uv_grid(64, 16, false), recursive_uv_grid(64, 16, false)] {
            assert!(img.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
        }
        let colored = uv_grid(64, 16, true);
        assert!(colored.pixels().any(|p| p[0] != p[2]));
    }

    #[test]
    fn ramp_thirds() {
        let img = gamma_ramp_float(300);
        let linear = img.get_pixel(150, 150)[0];
        assert_approx_eq!(f32, linear, 0.5);
        assert!(img.get_pixel(150, 10)[0] > linear);
        assert!(img.get_pixel(150, 290)[0] < linear);
        let bytes = gamma_ramp(300);
        assert_eq!(bytes.get_pixel(0, 0)[0], 0);
        assert_eq!(bytes.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn flat_bump_points_up() {
        let flat = RgbaImage::from_pixel(8, 8, Rgba([200, 200, 200, 255]));
        let normal = bump_to_normal(&flat, 4.0);
        assert!(normal.pixels().all(|p| *p == Rgba([128, 128, 255, 255])));
    }

    #[test]
    fn bump_slopes() {
        let normal = bump_to_normal(&checker(64, 16), 4.0);
        // left edge of a light tile: the surface rises towards +u
        let p = normal.get_pixel(16, 4);
        assert!(p[0] < 128);
        assert_eq!(p[1], 128);
    }
}
