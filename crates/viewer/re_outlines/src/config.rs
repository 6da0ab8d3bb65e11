use crate::{LayerMask, MaterialId, ObjectSettings, OutlineSettings, ResolvedOutline, ShaderId};

/// When, relative to the host's own passes, the outline pass runs.
///
/// Hosts sort their passes by [`RenderPassEvent::sorting_index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u32)]
pub enum RenderPassEvent {
    BeforeOpaques = 250,
    AfterOpaques = 300,
    AfterSkybox = 400,
    BeforeTransparents = 450,

    /// Outlines are drawn over everything but post processing.
    #[default]
    AfterTransparents = 500,

    BeforePostProcessing = 550,
    AfterPostProcessing = 600,
    AfterRendering = 1000,
}

impl RenderPassEvent {
    #[inline]
    pub fn sorting_index(self) -> u32 {
        self as u32
    }
}

/// Configuration of one outline pass, lives as long as the pipeline it is part of.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PassConfiguration {
    pub render_pass_event: RenderPassEvent,

    /// Edge detection & composite shader, see [`crate::shader_interface::OutlineShaderPass`].
    pub outline_shader: Option<ShaderId>,

    /// Masking shader, see [`crate::shader_interface::MaskShaderPass`].
    pub mask_shader: Option<ShaderId>,

    /// Material hidden geometry is drawn with unless an object overrides it.
    pub hidden_material: Option<MaterialId>,

    /// Scene layers outlined as a single group. Empty disables layer outlines.
    pub layer_mask: LayerMask,

    /// Settings of the layer outline and of all objects with [`ObjectSettings::Inherited`].
    pub outline: OutlineSettings,
}

impl PassConfiguration {
    /// Settings for an object, or for the layer outline if `object` is `None`.
    #[inline]
    pub fn resolve<'a>(&'a self, object: Option<&'a ObjectSettings>) -> ResolvedOutline<'a> {
        ResolvedOutline::resolve(&self.outline, self.hidden_material, object)
    }
}

#[cfg(feature = "serde")]
impl PassConfiguration {
    pub fn from_json(json: &str) -> Result<Self, crate::ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, crate::ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_incomplete() {
        let config = PassConfiguration::default();
        assert_eq!(config.render_pass_event, RenderPassEvent::AfterTransparents);
        assert_eq!(config.outline_shader, None);
        assert_eq!(config.mask_shader, None);
        assert!(config.layer_mask.is_empty());
    }

    #[test]
    fn render_pass_events_are_ordered() {
        assert!(
            RenderPassEvent::AfterOpaques.sorting_index()
                < RenderPassEvent::AfterTransparents.sorting_index()
        );
        assert!(RenderPassEvent::AfterTransparents < RenderPassEvent::BeforePostProcessing);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = PassConfiguration::from_json(
            r#"{ "outline_shader": 1, "mask_shader": 2, "layer_mask": 5 }"#,
        )
        .unwrap();

        assert_eq!(config.outline_shader, Some(ShaderId(1)));
        assert_eq!(config.mask_shader, Some(ShaderId(2)));
        assert_eq!(config.layer_mask, LayerMask(5));
        assert_eq!(config.outline, OutlineSettings::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn out_of_range_outline_size_is_rejected() {
        let err = PassConfiguration::from_json(r#"{ "outline": { "outline_size": 3 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("at most 2"), "{err}");
    }
}
