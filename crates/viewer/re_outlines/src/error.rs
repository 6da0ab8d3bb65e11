/// The two shaders an outline pass can't do without.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderSlot {
    /// Edge detection & final composite.
    Outline,

    /// Silhouette masking & mask composition.
    Mask,
}

impl std::fmt::Display for ShaderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline => f.write_str("outline"),
            Self::Mask => f.write_str("mask"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineFeatureError {
    #[error("No {0} shader assigned")]
    MissingShader(ShaderSlot),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Outline size must be at most {max} pixels, got {0}", max = crate::OutlineSize::MAX.pixels())]
pub struct InvalidOutlineSize(pub u8);

#[cfg(feature = "serde")]
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to (de)serialize outline configuration: {0}")]
    Json(#[from] serde_json::Error),
}
