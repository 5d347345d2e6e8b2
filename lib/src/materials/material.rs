use super::Texture;
use crate::error::InvariantError;
use crate::geometry::ColorRGB;
use crate::scene::Handle;
use std::fmt;
use std::str::FromStr;

/// Shading model of a material. Selects how the material is converted to metallic-roughness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Emission,
    Diffuse,
    Plastic,
    Metal,
    Glass,
}

impl MaterialKind {
    /// Returns every kind, in declaration order.
    pub fn all() -> [MaterialKind; 5] {
        [
            MaterialKind::Emission,
            MaterialKind::Diffuse,
            MaterialKind::Plastic,
            MaterialKind::Metal,
            MaterialKind::Glass,
        ]
    }

    /// Returns the name of the kind, as written in material files.
    pub fn name(&self) -> &'static str {
        match self {
            MaterialKind::Emission => "emission",
            MaterialKind::Diffuse => "diffuse",
            MaterialKind::Plastic => "plastic",
            MaterialKind::Metal => "metal",
            MaterialKind::Glass => "glass",
        }
    }
}

impl FromStr for MaterialKind {
    type Err = InvariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKind::all()
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| InvariantError::UnsupportedMaterialKind(s.to_string()))
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A surface description of the flat scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Shading model. A material without kind is converted as plastic.
    pub kind: Option<MaterialKind>,
    pub emission: ColorRGB,
    pub diffuse: ColorRGB,
    pub specular: ColorRGB,
    pub transmission: ColorRGB,
    pub roughness: f32,
    pub opacity: f32,
    pub emission_texture: Option<Handle<Texture>>,
    pub diffuse_texture: Option<Handle<Texture>>,
    pub specular_texture: Option<Handle<Texture>>,
    pub transmission_texture: Option<Handle<Texture>>,
    pub normal_texture: Option<Handle<Texture>>,
}

impl Default for Material {
    /// Generates a black, opaque material without kind.
    fn default() -> Self {
        Material {
            kind: None,
            emission: ColorRGB::black(),
            diffuse: ColorRGB::black(),
            specular: ColorRGB::black(),
            transmission: ColorRGB::black(),
            roughness: 0.0,
            opacity: 1.0,
            emission_texture: None,
            diffuse_texture: None,
            specular_texture: None,
            transmission_texture: None,
            normal_texture: None,
        }
    }
}

const DIELECTRIC_SPECULAR: ColorRGB = ColorRGB::gray(0.04);

impl Material {
    pub fn emission(color: ColorRGB, texture: Option<Handle<Texture>>) -> Self {
        Material {
            kind: Some(MaterialKind::Emission),
            emission: color,
            emission_texture: texture,
            ..Default::default()
        }
    }

    pub fn diffuse(color: ColorRGB, texture: Option<Handle<Texture>>) -> Self {
        Material {
            kind: Some(MaterialKind::Diffuse),
            diffuse: color,
            diffuse_texture: texture,
            ..Default::default()
        }
    }

    pub fn plastic(color: ColorRGB, roughness: f32, texture: Option<Handle<Texture>>) -> Self {
        Material {
            kind: Some(MaterialKind::Plastic),
            diffuse: color,
            specular: DIELECTRIC_SPECULAR,
            roughness,
            diffuse_texture: texture,
            ..Default::default()
        }
    }

    /// Metals store their color in the specular component.
    pub fn metal(color: ColorRGB, roughness: f32, texture: Option<Handle<Texture>>) -> Self {
        Material {
            kind: Some(MaterialKind::Metal),
            specular: color,
            roughness,
            specular_texture: texture,
            ..Default::default()
        }
    }

    pub fn glass(color: ColorRGB, roughness: f32, texture: Option<Handle<Texture>>) -> Self {
        Material {
            kind: Some(MaterialKind::Glass),
            specular: DIELECTRIC_SPECULAR,
            transmission: color,
            roughness,
            specular_texture: texture,
            ..Default::default()
        }
    }

    pub fn transparent_diffuse(
        color: ColorRGB,
        opacity: f32,
        texture: Option<Handle<Texture>>,
    ) -> Self {
        Material {
            opacity,
            ..Material::diffuse(color, texture)
        }
    }

    pub fn transparent_plastic(
        color: ColorRGB,
        roughness: f32,
        opacity: f32,
        texture: Option<Handle<Texture>>,
    ) -> Self {
        Material {
            opacity,
            ..Material::plastic(color, roughness, texture)
        }
    }

    /// Sets the normal map of the material.
    pub fn with_normal_map(mut self, texture: Option<Handle<Texture>>) -> Self {
        self.normal_texture = texture;
        self
    }

    /// Iterates every texture referenced by the material.
    pub fn textures(&self) -> impl Iterator<Item = Handle<Texture>> {
        [
            self.emission_texture,
            self.diffuse_texture,
            self.specular_texture,
            self.transmission_texture,
            self.normal_texture,
        ]
        .into_iter()
        .flatten()
    }
}
