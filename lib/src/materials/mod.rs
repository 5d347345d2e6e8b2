mod material;
pub use self::material::{Material, MaterialKind};
mod presets;
pub use self::presets::{material_preset, MaterialPreset};
mod texture;
pub use self::texture::{Texture, TextureData, TextureFormat};
