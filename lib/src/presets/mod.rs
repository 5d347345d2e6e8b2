//! Named scene factories selectable from the command line.
//!
//! A [Preset] expands into one or more [SceneKind]s, one per written scene (usually one per
//! [Lighting] variant).
mod objects;
mod lights;
mod simple;
pub use self::simple::SimpleKind;
mod instances;
pub use self::instances::InstanceCount;
mod matball;
pub use self::matball::{MatballShape, MATBALL_MATERIALS};
mod cornell;
mod rigid;
pub use self::rigid::RigidLayout;
mod mesh;
pub use self::mesh::MeshKind;

use crate::error::{Result, ValidationError};
use crate::scene::Scene;
use std::fmt;
use std::str::FromStr;

/// Light setup added on top of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lighting {
    Point,
    Area,
    Env,
}

impl Lighting {
    pub const ALL: [Lighting; 3] = [Lighting::Point, Lighting::Area, Lighting::Env];

    pub fn name(&self) -> &'static str {
        match self {
            Lighting::Point => "pointlight",
            Lighting::Area => "arealight",
            Lighting::Env => "envlight",
        }
    }
}

/// Selectable scene family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Simple(SimpleKind),
    Instances(InstanceCount),
    /// Material ball with the given material preset.
    Matball(&'static str),
    Mesh(MeshKind),
    CornellBox,
    Rigid,
    Textures,
}

impl Preset {
    /// Every preset, in generation order.
    pub fn all() -> Vec<Preset> {
        let mut all = Vec::new();
        all.extend(MeshKind::ALL.iter().copied().map(Preset::Mesh));
        all.extend(SimpleKind::ALL.iter().copied().map(Preset::Simple));
        all.extend(InstanceCount::ALL.iter().copied().map(Preset::Instances));
        all.extend(MATBALL_MATERIALS.iter().copied().map(Preset::Matball));
        all.extend([Preset::CornellBox, Preset::Rigid, Preset::Textures]);
        all
    }

    pub fn name(&self) -> String {
        match self {
            Preset::Simple(kind) => kind.name().to_string(),
            Preset::Instances(count) => count.name().to_string(),
            Preset::Matball(material) => format!("matball_{material}"),
            Preset::Mesh(kind) => format!("mesh_{}", kind.name()),
            Preset::CornellBox => "cornell_box".to_string(),
            Preset::Rigid => "rigid".to_string(),
            Preset::Textures => "textures".to_string(),
        }
    }

    /// Scenes written by this preset. Empty for presets that only write images.
    pub fn scenes(&self) -> Vec<SceneKind> {
        match *self {
            Preset::Simple(kind) => Lighting::ALL
                .iter()
                .map(|l| SceneKind::Simple(kind, *l))
                .collect(),
            Preset::Instances(count) => Lighting::ALL
                .iter()
                .map(|l| SceneKind::Instances(count, *l))
                .collect(),
            Preset::Matball(material) => Lighting::ALL
                .iter()
                .map(|l| SceneKind::Matball(material, *l))
                .collect(),
            Preset::Mesh(kind) => vec![SceneKind::Mesh(kind)],
            Preset::CornellBox => vec![SceneKind::CornellBox],
            Preset::Rigid => RigidLayout::ALL
                .iter()
                .map(|layout| SceneKind::Rigid(*layout))
                .collect(),
            Preset::Textures => Vec::new(),
        }
    }
}

impl FromStr for Preset {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Preset::all()
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ValidationError::preset("scene", s))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A single scene to build and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Simple(SimpleKind, Lighting),
    Instances(InstanceCount, Lighting),
    Matball(&'static str, Lighting),
    Mesh(MeshKind),
    CornellBox,
    Rigid(RigidLayout),
}

impl SceneKind {
    /// Base name of the written files.
    pub fn name(&self) -> String {
        match self {
            SceneKind::Simple(kind, light) => format!("{}_{}", kind.name(), light.name()),
            SceneKind::Instances(count, light) => format!("{}_{}", count.name(), light.name()),
            SceneKind::Matball(material, light) => {
                format!("matball_{}_{}", material, light.name())
            }
            SceneKind::Mesh(kind) => format!("mesh_{}", kind.name()),
            SceneKind::CornellBox => "cornell_box".to_string(),
            SceneKind::Rigid(layout) => {
                format!("rigid_{}_{}", layout.name(), Lighting::Point.name())
            }
        }
    }

    /// Mesh scenes are written as plain resources, without nodes nor cameras.
    pub fn with_nodes(&self) -> bool {
        !matches!(self, SceneKind::Mesh(_))
    }

    /// Whether the flat output keeps instancing instead of baking every instance.
    pub fn keeps_instances(&self) -> bool {
        matches!(self, SceneKind::Instances(..))
    }

    pub fn build(&self) -> Result<Scene> {
        let mut scene = Scene::new();
        match *self {
            SceneKind::Simple(kind, light) => simple::build(&mut scene, kind, light)?,
            SceneKind::Instances(count, light) => instances::build(&mut scene, count, light)?,
            SceneKind::Matball(material, light) => {
                matball::build(&mut scene, material, MatballShape::Open, light)?
            }
            SceneKind::Mesh(kind) => mesh::build(&mut scene, kind)?,
            SceneKind::CornellBox => cornell::build(&mut scene)?,
            SceneKind::Rigid(layout) => rigid::build(&mut scene, layout)?,
        }
        Ok(scene)
    }
}
