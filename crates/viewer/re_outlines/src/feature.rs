use crate::{OutlinePass, PassConfiguration, RenderHost, SharedOutlineRegistry};

/// Entry point a host pipeline creates once per configured outline effect.
///
/// An incomplete configuration doesn't fail the pipeline: the feature is created disabled,
/// a warning is logged and no pass is ever scheduled.
pub struct OutlineFeature {
    name: String,
    pass: Option<OutlinePass>,
}

impl OutlineFeature {
    pub fn create<H: RenderHost + ?Sized>(
        name: impl Into<String>,
        config: PassConfiguration,
        registry: SharedOutlineRegistry,
        host: &mut H,
    ) -> Self {
        re_tracing::profile_function!();

        let name = name.into();
        let pass = match OutlinePass::new(config, registry, host) {
            Ok(pass) => Some(pass),
            Err(err) => {
                re_log::warn!("Outline feature {name:?} is disabled: {err}");
                None
            }
        };

        Self { name, pass }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.pass.is_some()
    }

    /// The pass to enqueue, `None` if the feature is disabled.
    #[inline]
    pub fn pass(&self) -> Option<&OutlinePass> {
        self.pass.as_ref()
    }

    #[inline]
    pub fn pass_mut(&mut self) -> Option<&mut OutlinePass> {
        self.pass.as_mut()
    }
}
