//! Names and pass indices the outline & mask shaders have to honor.
//!
//! The shaders themselves are provided by the host.

/// Source texture of every full screen pass.
pub const MAIN_TEX: &str = "_MainTex";

/// Mask of the object's part that is hidden behind other geometry.
pub const HIDDEN_MASK_TEX: &str = "_HiddenMaskTex";

/// The object's hidden part, drawn with the hidden material.
pub const HIDDEN_TEX: &str = "_HiddenTex";

/// Outline tint, per draw.
pub const OUTLINE_COLOR: &str = "_OutlineColor";

/// Outline width in pixels, per draw.
pub const OUTLINE_SIZE: &str = "_SizeId";

/// Passes of the mask shader.
///
/// Pass 1 (alpha tested silhouette) is not used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MaskShaderPass {
    /// Flat silhouette of whatever is drawn.
    Silhouette = 0,

    /// Turns a silhouette drawn with the object's own materials into a mask.
    MaskFromColor = 2,

    /// Combines mask, hidden mask and hidden geometry.
    CompositeHidden = 3,

    /// Applies the accumulated hidden geometry to the color target.
    ApplyToColor = 4,
}

/// Passes of the outline shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OutlineShaderPass {
    /// Edge detection & dilation of the mask.
    Dilate = 0,

    /// Blends the outline onto the color target.
    Composite = 1,
}

impl MaskShaderPass {
    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }
}

impl OutlineShaderPass {
    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }
}
