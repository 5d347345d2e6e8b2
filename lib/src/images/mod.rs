//! Procedural textures and sky environment maps written next to the generated scenes.
mod procedural;
pub use self::procedural::{
    bump_to_normal, checker, gamma_ramp, gamma_ramp_float, grid, recursive_uv_grid, uv_grid,
};
mod sky;
pub use self::sky::{PreethamSky, SkyModel};
mod envmap;
pub use self::envmap::{sky_envmap, EnvMapParams};

use crate::config::TEXTURE_SIZE;
use crate::materials::TextureData;

const TILE: u32 = 64;
const NORMAL_SCALE: f32 = 4.0;

/// The texture set referenced by the material presets, keyed by file name.
///
/// `parallel` lets the sky maps spread over the current rayon pool.
pub fn texture_set(parallel: bool) -> Vec<(&'static str, TextureData)> {
    let size = TEXTURE_SIZE;
    let bytes = |name, img| (name, TextureData::Rgba(img));
    let env = EnvMapParams::default();
    let sky = PreethamSky::new(env.turbidity, env.sun_theta);
    let sky_map = sky_envmap(&sky, &env, parallel);
    vec![
        bytes("grid.png", grid(size, TILE)),
        bytes("checker.png", checker(size, TILE)),
        bytes("rchecker.png", recursive_uv_grid(size, TILE, false)),
        bytes("colored.png", uv_grid(size, TILE, true)),
        bytes("rcolored.png", recursive_uv_grid(size, TILE, true)),
        bytes("gamma.png", gamma_ramp(size)),
        bytes("grid_normal.png", bump_to_normal(&grid(size, TILE), NORMAL_SCALE)),
        bytes("checker_normal.png", bump_to_normal(&checker(size, TILE), NORMAL_SCALE)),
        ("gamma.hdr", TextureData::RgbFloat(gamma_ramp_float(size))),
        ("env.hdr", TextureData::RgbFloat(sky_map.clone())),
        ("env01.hdr", TextureData::RgbFloat(sky_map)),
    ]
}

#[cfg(test)]
mod tests {
    use super::texture_set;
    use crate::materials::{material_preset, TextureFormat};

    #[test]
    fn preset_textures_are_generated() {
        let set = texture_set(false);
        assert_eq!(set.len(), 11);
        for (name, data) in &set {
            assert_eq!(TextureFormat::from_path(name), data.format(), "{name}");
        }
        for preset in ["floor_txt", "plastic01_txt", "bump01", "plastic05_txt"] {
            let preset = material_preset(preset).unwrap();
            for path in preset.texture.iter().chain(preset.normal_map.iter()) {
                assert!(set.iter().any(|(name, _)| name == path), "{path}");
            }
        }
    }
}
