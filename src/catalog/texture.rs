use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
    sync::OnceLock,
};

use crate::foundation::error::{CollageError, CollageResult};

/// Pre-generated resolution variant of a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureVariant {
    /// Full-resolution variant used for large and medium chunks.
    Large,
    /// Reduced variant used for small accents and glitch bands.
    Small,
    /// Low-resolution variant meant for nearest-neighbor upscaling.
    Pixelated,
    /// Blurred placeholder variant.
    Blur,
}

/// One catalog entry: a stable id, its four variant references, and its aspect ratio.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Texture {
    /// Stable identifier.
    pub id: String,
    /// Reference to the large variant.
    pub large: String,
    /// Reference to the small variant.
    pub small: String,
    /// Reference to the pixelated variant.
    pub pixelated: String,
    /// Reference to the blurred variant.
    pub blur: String,
    /// Width / height of the source image.
    pub aspect: f64,
}

impl Texture {
    /// Build a texture whose variants follow the `<dir>/tex-<id>-<suffix>.webp` convention.
    pub fn with_conventional_paths(dir: &str, id: &str, aspect: f64) -> Self {
        let path = |suffix: &str| format!("{dir}/tex-{id}-{suffix}.webp");
        Self {
            id: id.to_string(),
            large: path("lg"),
            small: path("sm"),
            pixelated: path("pix"),
            blur: path("blur"),
            aspect,
        }
    }

    /// Reference for the requested variant.
    pub fn variant(&self, variant: TextureVariant) -> &str {
        match variant {
            TextureVariant::Large => &self.large,
            TextureVariant::Small => &self.small,
            TextureVariant::Pixelated => &self.pixelated,
            TextureVariant::Blur => &self.blur,
        }
    }
}

// Order is part of the layout contract: texture indices are drawn by position.
const BUILTIN_TEXTURES: [(&str, f64); 14] = [
    ("7042926", 1.506),
    ("440731", 1.896),
    ("4598877", 0.667),
    ("2097628", 0.665),
    ("35720176", 0.667),
    ("479333", 1.500),
    ("19670", 1.504),
    ("46160", 1.494),
    ("531972", 1.500),
    ("53594", 1.333),
    ("30560139", 0.563),
    ("29288699", 1.500),
    ("32047220", 1.500),
    ("30115009", 0.751),
];

/// Ordered, read-only list of textures that chunk and band indices resolve against.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct TextureCatalog {
    textures: Vec<Texture>,
}

impl TextureCatalog {
    /// The built-in catalog served from `/textures`.
    pub fn builtin() -> &'static TextureCatalog {
        static BUILTIN: OnceLock<TextureCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| TextureCatalog {
            textures: BUILTIN_TEXTURES
                .iter()
                .map(|&(id, aspect)| Texture::with_conventional_paths("/textures", id, aspect))
                .collect(),
        })
    }

    /// Build a catalog, rejecting empty lists, duplicate ids and invalid aspect ratios.
    pub fn new(textures: Vec<Texture>) -> CollageResult<Self> {
        if textures.is_empty() {
            return Err(CollageError::catalog("texture catalog must not be empty"));
        }
        let mut ids = BTreeSet::new();
        for t in &textures {
            if !ids.insert(t.id.as_str()) {
                return Err(CollageError::catalog(format!(
                    "duplicate texture id '{}'",
                    t.id
                )));
            }
            if !(t.aspect.is_finite() && t.aspect > 0.0) {
                return Err(CollageError::catalog(format!(
                    "texture '{}' aspect must be finite and > 0",
                    t.id
                )));
            }
        }
        Ok(Self { textures })
    }

    /// Parse a catalog from a JSON array of textures.
    pub fn from_reader<R: Read>(r: R) -> CollageResult<Self> {
        let textures: Vec<Texture> = serde_json::from_reader(r)
            .map_err(|e| CollageError::serde(format!("parse texture catalog JSON: {e}")))?;
        Self::new(textures)
    }

    /// Parse a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CollageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CollageError::validation(format!("open catalog JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Number of textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Always `false` for a constructed catalog; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Texture at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }

    /// Texture at `index`, or a catalog error naming the mismatch.
    pub fn require(&self, index: usize) -> CollageResult<&Texture> {
        self.get(index).ok_or_else(|| {
            CollageError::catalog(format!(
                "texture index {index} out of bounds for catalog of {}",
                self.len()
            ))
        })
    }

    /// Iterate textures in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Texture> {
        self.textures.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/texture.rs"]
mod tests;
