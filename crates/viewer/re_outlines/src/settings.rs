//! Outline appearance and behavior, globally and per object.
//!
//! Every outline is drawn from exactly one [`OutlineSettings`] value:
//! * layer outlines always use the global settings of the [`crate::PassConfiguration`],
//! * outlined objects either carry their own settings ([`ObjectSettings::Explicit`])
//!   or inherit the global ones ([`ObjectSettings::Inherited`]).
//!
//! [`ResolvedOutline::resolve`] is the only place where that choice is made, so an outline's
//! color/size can never come from a different settings value than its flags.

use crate::{
    InvalidOutlineSize, MaterialId, MaterialProperties, PropertyValue, shader_interface,
};

bitflags::bitflags! {
    /// Feature switches of an outline.
    ///
    /// Bit `0b10` used to select alpha tested silhouettes and is unassigned.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct OutlineFlags: u8 {
        /// Only outline the part of the object that passes the scene depth test.
        const USE_DEPTH = 0b0001;

        /// Additionally show the part of the object that is hidden behind other geometry.
        const SHOW_HIDDEN = 0b0100;

        /// Extract the silhouette with the object's own materials instead of a flat mask material.
        const PRECISE = 0b1000;
    }
}

/// Outline width in pixels, in `0..=2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct OutlineSize(u8);

impl OutlineSize {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(2);

    pub fn new(pixels: u8) -> Result<Self, InvalidOutlineSize> {
        if pixels <= Self::MAX.0 {
            Ok(Self(pixels))
        } else {
            Err(InvalidOutlineSize(pixels))
        }
    }

    #[inline]
    pub fn pixels(self) -> u8 {
        self.0
    }
}

impl Default for OutlineSize {
    #[inline]
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for OutlineSize {
    type Error = InvalidOutlineSize;

    #[inline]
    fn try_from(pixels: u8) -> Result<Self, Self::Error> {
        Self::new(pixels)
    }
}

impl From<OutlineSize> for u8 {
    #[inline]
    fn from(size: OutlineSize) -> Self {
        size.0
    }
}

/// How a single outline looks and how its silhouette is extracted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OutlineSettings {
    pub color: ecolor::Rgba,

    pub outline_size: OutlineSize,

    pub flags: OutlineFlags,

    /// Alpha threshold for alpha tested silhouettes.
    ///
    /// Alpha testing is not supported, the value is only carried along so that stored settings
    /// survive a load/save cycle unchanged.
    pub alpha_cutoff: f32,

    /// Shader passes to draw per submesh in [`OutlineFlags::PRECISE`] mode.
    ///
    /// Submeshes without an entry are drawn with pass 0, submeshes with an empty entry not at all.
    pub shader_passes: Vec<Vec<u32>>,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            color: ecolor::Rgba::WHITE,
            outline_size: OutlineSize::default(),
            flags: OutlineFlags::empty(),
            alpha_cutoff: 0.5,
            shader_passes: Vec::new(),
        }
    }
}

impl OutlineSettings {
    #[inline]
    pub fn is_precise(&self) -> bool {
        self.flags.contains(OutlineFlags::PRECISE)
    }

    #[inline]
    pub fn shows_hidden(&self) -> bool {
        self.flags.contains(OutlineFlags::SHOW_HIDDEN)
    }

    #[inline]
    pub fn depth_binding(&self) -> DepthBinding {
        DepthBinding::from_flags(self.flags)
    }

    /// Shader passes a submesh is drawn with during precise silhouette extraction.
    ///
    /// An empty list keeps the submesh out of the silhouette.
    pub fn shader_passes_for_submesh(&self, submesh_index: usize) -> &[u32] {
        match self.shader_passes.get(submesh_index) {
            Some(passes) => passes.as_slice(),
            None => &[0],
        }
    }

    /// Per-draw values of the outline shader.
    pub fn properties(&self) -> MaterialProperties {
        let mut props = MaterialProperties::default();
        props.set(
            shader_interface::OUTLINE_COLOR,
            PropertyValue::Color(self.color),
        );
        props.set(
            shader_interface::OUTLINE_SIZE,
            PropertyValue::Int(self.outline_size.pixels().into()),
        );
        props
    }
}

/// Per-object replacement for the material hidden geometry is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HiddenMaterialOverride {
    pub enabled: bool,

    /// Ignored unless [`Self::enabled`] is set. If unset, the pass default is used.
    pub material: Option<MaterialId>,
}

impl HiddenMaterialOverride {
    #[inline]
    pub fn resolve(self, pass_default: Option<MaterialId>) -> Option<MaterialId> {
        match self {
            Self {
                enabled: true,
                material: Some(material),
            } => Some(material),
            _ => pass_default,
        }
    }
}

/// Outline settings of a single outlined object.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ObjectSettings {
    /// Use the global settings of the pass, including its hidden material.
    #[default]
    Inherited,

    Explicit {
        settings: OutlineSettings,

        #[cfg_attr(feature = "serde", serde(default))]
        hidden_material: HiddenMaterialOverride,
    },
}

impl ObjectSettings {
    pub fn explicit(settings: OutlineSettings) -> Self {
        Self::Explicit {
            settings,
            hidden_material: HiddenMaterialOverride::default(),
        }
    }
}

/// Which of the two silhouette draws of an outline reads the scene depth.
///
/// The silhouette draw and the hidden reveal draw must see complementary parts of the object,
/// so at most one of them may ever be depth tested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DepthBinding {
    /// Neither draw is depth tested, there is no hidden reveal.
    None,

    /// The silhouette is depth tested, the hidden reveal (if any) is not.
    ScenePass,

    /// The hidden reveal is depth tested, the silhouette is not.
    HiddenPass,
}

impl DepthBinding {
    pub fn from_flags(flags: OutlineFlags) -> Self {
        if flags.contains(OutlineFlags::USE_DEPTH) {
            Self::ScenePass
        } else if flags.contains(OutlineFlags::SHOW_HIDDEN) {
            Self::HiddenPass
        } else {
            Self::None
        }
    }

    #[inline]
    pub fn scene_pass_uses_depth(self) -> bool {
        self == Self::ScenePass
    }

    #[inline]
    pub fn hidden_pass_uses_depth(self) -> bool {
        self == Self::HiddenPass
    }
}

/// The settings an outline is actually drawn with this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedOutline<'a> {
    pub settings: &'a OutlineSettings,

    /// Material for hidden geometry, `None` if neither the object nor the pass provide one.
    pub hidden_material: Option<MaterialId>,
}

impl<'a> ResolvedOutline<'a> {
    /// Picks the settings for an object, or for the layer outline if `object` is `None`.
    pub fn resolve(
        global: &'a OutlineSettings,
        default_hidden_material: Option<MaterialId>,
        object: Option<&'a ObjectSettings>,
    ) -> Self {
        match object {
            None | Some(ObjectSettings::Inherited) => Self {
                settings: global,
                hidden_material: default_hidden_material,
            },
            Some(ObjectSettings::Explicit {
                settings,
                hidden_material,
            }) => Self {
                settings,
                hidden_material: hidden_material.resolve(default_hidden_material),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(color: ecolor::Rgba, size: u8, flags: OutlineFlags) -> OutlineSettings {
        OutlineSettings {
            color,
            outline_size: OutlineSize::new(size).unwrap(),
            flags,
            ..Default::default()
        }
    }

    #[test]
    fn outline_size_range() {
        assert_eq!(OutlineSize::new(0).map(OutlineSize::pixels), Ok(0));
        assert_eq!(OutlineSize::new(2).map(OutlineSize::pixels), Ok(2));
        assert_eq!(OutlineSize::new(3), Err(InvalidOutlineSize(3)));
        assert_eq!(OutlineSize::default(), OutlineSize::MAX);
    }

    #[test]
    fn inherited_object_uses_global_settings() {
        let global = settings(ecolor::Rgba::GREEN, 2, OutlineFlags::SHOW_HIDDEN);
        let default_hidden = Some(MaterialId(7));

        let resolved =
            ResolvedOutline::resolve(&global, default_hidden, Some(&ObjectSettings::Inherited));
        assert!(std::ptr::eq(resolved.settings, &global));
        assert_eq!(resolved.hidden_material, default_hidden);

        let layer = ResolvedOutline::resolve(&global, default_hidden, None);
        assert_eq!(layer, resolved);
    }

    #[test]
    fn explicit_object_uses_own_settings() {
        let global = settings(ecolor::Rgba::GREEN, 2, OutlineFlags::empty());
        let own = ObjectSettings::explicit(settings(ecolor::Rgba::BLACK, 1, OutlineFlags::PRECISE));

        let resolved = ResolvedOutline::resolve(&global, None, Some(&own));
        assert_eq!(resolved.settings.color, ecolor::Rgba::BLACK);
        assert_eq!(resolved.settings.outline_size.pixels(), 1);
        assert!(resolved.settings.is_precise());
    }

    #[test]
    fn hidden_material_override() {
        let default = Some(MaterialId(1));
        let custom = MaterialId(2);

        let disabled = HiddenMaterialOverride {
            enabled: false,
            material: Some(custom),
        };
        assert_eq!(disabled.resolve(default), default);

        let enabled_without_material = HiddenMaterialOverride {
            enabled: true,
            material: None,
        };
        assert_eq!(enabled_without_material.resolve(default), default);

        let enabled = HiddenMaterialOverride {
            enabled: true,
            material: Some(custom),
        };
        assert_eq!(enabled.resolve(default), Some(custom));
        assert_eq!(enabled.resolve(None), Some(custom));
    }

    #[test]
    fn depth_binding_is_exclusive() {
        for bits in 0..=OutlineFlags::all().bits() {
            let flags = OutlineFlags::from_bits_truncate(bits);
            let binding = DepthBinding::from_flags(flags);

            assert!(!(binding.scene_pass_uses_depth() && binding.hidden_pass_uses_depth()));
            assert_eq!(
                binding.scene_pass_uses_depth(),
                flags.contains(OutlineFlags::USE_DEPTH)
            );
            if flags.contains(OutlineFlags::SHOW_HIDDEN) {
                assert_ne!(
                    binding.scene_pass_uses_depth(),
                    binding.hidden_pass_uses_depth()
                );
            }
        }
    }

    #[test]
    fn shader_passes_per_submesh() {
        let settings = OutlineSettings {
            shader_passes: vec![vec![0, 2], vec![]],
            ..Default::default()
        };
        assert_eq!(settings.shader_passes_for_submesh(0), &[0, 2]);
        assert!(settings.shader_passes_for_submesh(1).is_empty());
        assert_eq!(settings.shader_passes_for_submesh(5), &[0]);
    }

    #[test]
    fn properties_carry_color_and_size() {
        let props = settings(ecolor::Rgba::RED, 1, OutlineFlags::empty()).properties();
        assert_eq!(
            props.get(shader_interface::OUTLINE_COLOR),
            Some(PropertyValue::Color(ecolor::Rgba::RED))
        );
        assert_eq!(
            props.get(shader_interface::OUTLINE_SIZE),
            Some(PropertyValue::Int(1))
        );
    }
}
