//! Texture asset catalog loaded from TOML.
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Texture ids are packed into 5-bit control-map fields.
pub const MAX_TEXTURES: usize = 32;

#[derive(Clone, Debug)]
pub struct TextureAsset {
    pub id: u32,
    pub name: String,
    pub albedo: [f32; 4],
    pub uv_scale: f32,
    pub detiling_rotation: f32,
    pub detiling_shift: f32,
}

#[derive(Default, Clone, Debug)]
pub struct AssetCatalog {
    pub textures: Vec<TextureAsset>,
    pub by_name: HashMap<String, u32>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&TextureAsset> {
        self.textures.iter().find(|t| t.id == id)
    }

    pub fn get_id(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: CatalogConfig = toml::from_str(toml_str)?;
        if cfg.textures.len() > MAX_TEXTURES {
            return Err(format!(
                "{} textures configured, the control map addresses at most {MAX_TEXTURES}",
                cfg.textures.len()
            )
            .into());
        }

        // Explicit ids claim their slots first; the rest fill lowest-free.
        let mut taken = [false; MAX_TEXTURES];
        for entry in &cfg.textures {
            if let Some(id) = entry.id {
                let slot = id as usize;
                if slot >= MAX_TEXTURES {
                    return Err(format!(
                        "texture '{}' id {id} exceeds the 5-bit id range",
                        entry.name
                    )
                    .into());
                }
                if taken[slot] {
                    return Err(format!("texture '{}' reuses id {id}", entry.name).into());
                }
                taken[slot] = true;
            }
        }

        let mut catalog = AssetCatalog::new();
        for entry in cfg.textures {
            let id = match entry.id {
                Some(id) => id,
                None => {
                    let slot = taken
                        .iter()
                        .position(|t| !t)
                        .ok_or_else(|| format!("no free id slot for texture '{}'", entry.name))?;
                    taken[slot] = true;
                    slot as u32
                }
            };
            if catalog.by_name.contains_key(&entry.name) {
                return Err(format!("duplicate texture name '{}'", entry.name).into());
            }
            catalog.by_name.insert(entry.name.clone(), id);
            catalog.textures.push(TextureAsset {
                id,
                name: entry.name,
                albedo: entry.albedo,
                uv_scale: entry.uv_scale,
                detiling_rotation: entry.detiling_rotation,
                detiling_shift: entry.detiling_shift,
            });
        }
        catalog.textures.sort_by_key(|t| t.id);
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
struct CatalogConfig {
    #[serde(default)]
    textures: Vec<TextureEntry>,
}

#[derive(Deserialize)]
struct TextureEntry {
    name: String,
    id: Option<u32>,
    #[serde(default = "default_albedo")]
    albedo: [f32; 4],
    #[serde(default = "default_uv_scale")]
    uv_scale: f32,
    #[serde(default)]
    detiling_rotation: f32,
    #[serde(default)]
    detiling_shift: f32,
}

fn default_albedo() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

fn default_uv_scale() -> f32 {
    0.1
}
