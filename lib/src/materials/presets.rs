use super::{Material, MaterialKind, Texture};
use crate::geometry::{srgb, ColorRGB};
use crate::scene::Handle;

/// Parameters of a named material, with textures still expressed as paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialPreset {
    pub kind: MaterialKind,
    pub color: ColorRGB,
    pub roughness: f32,
    pub texture: Option<&'static str>,
    pub normal_map: Option<&'static str>,
}

impl MaterialPreset {
    const fn new(kind: MaterialKind, color: ColorRGB, roughness: f32) -> Self {
        MaterialPreset {
            kind,
            color,
            roughness,
            texture: None,
            normal_map: None,
        }
    }

    const fn textured(mut self, path: &'static str) -> Self {
        self.texture = Some(path);
        self
    }

    const fn bumped(mut self, path: &'static str) -> Self {
        self.normal_map = Some(path);
        self
    }

    /// Builds the material, given the handles of the already registered textures.
    pub fn build(
        &self,
        texture: Option<Handle<Texture>>,
        normal_map: Option<Handle<Texture>>,
    ) -> Material {
        let material = match self.kind {
            MaterialKind::Emission => Material::emission(self.color, texture),
            MaterialKind::Diffuse => Material::diffuse(self.color, texture),
            MaterialKind::Plastic => Material::plastic(self.color, self.roughness, texture),
            MaterialKind::Metal => Material::metal(self.color, self.roughness, texture),
            MaterialKind::Glass => Material::glass(self.color, self.roughness, texture),
        };
        material.with_normal_map(normal_map)
    }
}

fn emission(value: f32) -> MaterialPreset {
    MaterialPreset::new(MaterialKind::Emission, ColorRGB::gray(value), 0.0)
}

fn diffuse(color: ColorRGB) -> MaterialPreset {
    MaterialPreset::new(MaterialKind::Diffuse, color, 0.0)
}

fn plastic(color: ColorRGB, roughness: f32) -> MaterialPreset {
    MaterialPreset::new(MaterialKind::Plastic, color, roughness)
}

fn metal(color: ColorRGB, roughness: f32) -> MaterialPreset {
    MaterialPreset::new(MaterialKind::Metal, color, roughness)
}

fn glass(roughness: f32) -> MaterialPreset {
    MaterialPreset::new(MaterialKind::Glass, ColorRGB::gray(0.8), roughness)
}

/// Looks up a material by its preset identifier.
pub fn material_preset(name: &str) -> Option<MaterialPreset> {
    const DARK: ColorRGB = ColorRGB::gray(0.2);
    const WHITE: ColorRGB = ColorRGB::gray(1.0);
    const RED: ColorRGB = ColorRGB::new(0.5, 0.2, 0.2);
    const GREEN: ColorRGB = ColorRGB::new(0.2, 0.5, 0.2);
    const BLUE: ColorRGB = ColorRGB::new(0.2, 0.2, 0.5);
    const GRAY: ColorRGB = ColorRGB::gray(0.5);
    const SYM: ColorRGB = ColorRGB::new(0.2, 0.8, 0.2);
    let gold = srgb(245, 215, 121);
    let silver = srgb(252, 250, 246);
    let iron = srgb(195, 199, 199);
    let copper = srgb(250, 190, 160);
    let preset = match name {
        "def" | "matte00" | "floor" => diffuse(DARK),
        "matte01" => diffuse(RED),
        "matte02" => diffuse(GREEN),
        "matte03" => diffuse(BLUE),
        "matte04" => diffuse(GRAY),
        "matte00_txt" | "floor_txt" => diffuse(WHITE).textured("grid.png"),
        "matte01_txt" => diffuse(WHITE).textured("rcolored.png"),
        "matte02_txt" => diffuse(WHITE).textured("checker.png"),
        "matte03_txt" => diffuse(WHITE).textured("colored.png"),
        "plastic00" => plastic(DARK, 0.01),
        "plastic01" => plastic(RED, 0.1),
        "plastic02" => plastic(GREEN, 0.05),
        "plastic03" => plastic(BLUE, 0.01),
        "plastic04" => plastic(GRAY, 0.01),
        "plastic00_txt" => plastic(WHITE, 0.1).textured("grid.png"),
        "plastic01_txt" => plastic(WHITE, 0.1).textured("rcolored.png"),
        "plastic02_txt" => plastic(WHITE, 0.05).textured("checker.png"),
        "plastic03_txt" | "plastic06_txt" => plastic(WHITE, 0.01).textured("colored.png"),
        "plastic04_txt" => plastic(DARK, 0.01).bumped("grid_normal.png"),
        "plastic05_txt" => plastic(DARK, 0.01).bumped("checker_normal.png"),
        "metal00" | "metal01" => metal(ColorRGB::gray(0.8), 0.0),
        "metal02" => metal(ColorRGB::gray(0.8), 0.01),
        "metal03" => metal(ColorRGB::gray(0.8), 0.05),
        "gold01" => metal(gold, 0.01),
        "gold02" => metal(gold, 0.05),
        "silver01" => metal(silver, 0.01),
        "silver02" => metal(silver, 0.05),
        "iron01" => metal(iron, 0.01),
        "iron02" => metal(iron, 0.05),
        "copper01" => metal(copper, 0.01),
        "copper02" => metal(copper, 0.05),
        "bump00" => plastic(GRAY, 0.05).bumped("grid_normal.png"),
        "bump01" => metal(copper, 0.01).bumped("grid_normal.png"),
        "bump02" => plastic(BLUE, 0.05).bumped("grid_normal.png"),
        "bump03" => metal(copper, 0.05).bumped("grid_normal.png"),
        "glass00" | "glass01" => glass(0.0),
        "glass02" => glass(0.01),
        "glass03" => glass(0.05),
        "lines00" | "lines01" | "lines02" | "lines03" | "lines01_txt" | "lines02_txt"
        | "lines03_txt" | "points00" | "points01" | "points01_txt" => diffuse(DARK),
        "pointlight" => emission(400.0),
        "arealight" => emission(40.0),
        "arealight_low" => emission(16.0),
        "env" => emission(1.0),
        "env_txt" => emission(1.0).textured("env.hdr"),
        "sym_points" | "sym_lines" | "sym_cloth" => diffuse(SYM),
        _ => return None,
    };
    Some(preset)
}

#[cfg(test)]
mod tests {
    use super::material_preset;
    use crate::geometry::ColorRGB;
    use crate::materials::MaterialKind;
    use float_cmp::assert_approx_eq;

    #[test]
    fn known_presets() {
        let gold = material_preset("gold02").unwrap();
        assert_eq!(gold.kind, MaterialKind::Metal);
        assert_approx_eq!(f32, gold.color.r, (245.0_f32 / 255.0).powf(2.2));
        assert_approx_eq!(f32, gold.roughness, 0.05);
        let floor = material_preset("floor_txt").unwrap();
        assert_eq!(floor.texture, Some("grid.png"));
        let bump = material_preset("bump01").unwrap();
        assert_eq!(bump.normal_map, Some("grid_normal.png"));
        assert!(bump.texture.is_none());
        let light = material_preset("pointlight").unwrap();
        assert_eq!(light.color, ColorRGB::gray(400.0));
    }

    #[test]
    fn unknown_preset() {
        assert!(material_preset("unobtainium").is_none());
        assert!(material_preset("").is_none());
    }

    #[test]
    fn build_routes_textures() {
        let metal = material_preset("bump03").unwrap().build(None, None);
        assert_eq!(metal.kind, Some(MaterialKind::Metal));
        assert!(metal.diffuse.is_black());
        assert!(!metal.specular.is_black());
        let plastic = material_preset("plastic00").unwrap().build(None, None);
        assert_eq!(plastic.specular, ColorRGB::gray(0.04));
    }
}
