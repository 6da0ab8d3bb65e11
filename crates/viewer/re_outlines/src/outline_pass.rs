use crate::{
    CameraDescriptor, Drawable, FrameContext, OutlineFeatureError, PassConfiguration,
    RenderHost, RenderPassEvent, ShaderSlot, SharedOutlineRegistry,
    compositor::{Compositor, PassMaterials},
    frame_targets::FrameTargets,
    host::with_debug_group,
};

/// Draws outlines around a layer group and around every registered [`crate::OutlinedObject`].
///
/// Lifecycle per camera and frame:
/// [`Self::on_camera_setup`] → [`Self::execute`] → [`Self::on_camera_cleanup`].
pub struct OutlinePass {
    config: PassConfiguration,
    registry: SharedOutlineRegistry,
    materials: PassMaterials,

    /// Only present between camera setup and cleanup.
    targets: Option<FrameTargets>,
}

impl OutlinePass {
    /// Fails if either of the two shaders is missing from `config`.
    pub fn new<H: RenderHost + ?Sized>(
        config: PassConfiguration,
        registry: SharedOutlineRegistry,
        host: &mut H,
    ) -> Result<Self, OutlineFeatureError> {
        let outline_shader = config
            .outline_shader
            .ok_or(OutlineFeatureError::MissingShader(ShaderSlot::Outline))?;
        let mask_shader = config
            .mask_shader
            .ok_or(OutlineFeatureError::MissingShader(ShaderSlot::Mask))?;

        let materials = PassMaterials {
            outline: host.create_engine_material(outline_shader),
            mask: host.create_engine_material(mask_shader),
        };

        Ok(Self {
            config,
            registry,
            materials,
            targets: None,
        })
    }

    #[inline]
    pub fn render_pass_event(&self) -> RenderPassEvent {
        self.config.render_pass_event
    }

    #[inline]
    pub fn config(&self) -> &PassConfiguration {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &SharedOutlineRegistry {
        &self.registry
    }

    /// Allocates the scratch targets for `camera`.
    pub fn on_camera_setup<H: RenderHost + ?Sized>(
        &mut self,
        host: &mut H,
        camera: &CameraDescriptor,
    ) {
        re_tracing::profile_function!();

        if let Some(previous) = self.targets.take() {
            re_log::debug!("Camera setup without cleanup, releasing previous outline targets");
            previous.release(host);
        }

        self.targets = Some(FrameTargets::allocate(host, camera));
    }

    /// Records and submits all outline compositions of this frame.
    pub fn execute<H: RenderHost + ?Sized>(&self, host: &mut H, frame: &FrameContext<'_>) {
        re_tracing::profile_function!();

        let Some(targets) = &self.targets else {
            re_log::error_once!("Outline pass executed without camera setup");
            return;
        };

        let mut compositor = Compositor {
            host,
            targets,
            materials: self.materials,
        };

        self.render_layers(&mut compositor, frame);
        self.render_objects(&mut compositor);

        compositor.host.execute();
    }

    /// Releases the scratch targets allocated in [`Self::on_camera_setup`].
    pub fn on_camera_cleanup<H: RenderHost + ?Sized>(&mut self, host: &mut H) {
        re_tracing::profile_function!();

        if let Some(targets) = self.targets.take() {
            targets.release(host);
        }
    }

    fn render_layers<H: RenderHost + ?Sized>(
        &self,
        compositor: &mut Compositor<'_, H>,
        frame: &FrameContext<'_>,
    ) {
        let layer_mask = self.config.layer_mask;
        if layer_mask.is_empty() {
            return;
        }

        let drawables: Vec<&Drawable> = frame
            .culled_objects
            .iter()
            .filter(|object| layer_mask.contains(object.layer))
            .map(|object| &object.drawable)
            .collect();
        if drawables.is_empty() {
            return;
        }

        re_tracing::profile_scope!("layers");
        with_debug_group(compositor.host, "Outline Pass - Layers", |host| {
            Compositor {
                host,
                targets: compositor.targets,
                materials: compositor.materials,
            }
            .composite(&drawables, self.config.resolve(None));
        });
    }

    fn render_objects<H: RenderHost + ?Sized>(&self, compositor: &mut Compositor<'_, H>) {
        let objects = self.registry.snapshot();
        if objects.is_empty() {
            return;
        }

        re_tracing::profile_scope!("objects");
        with_debug_group(compositor.host, "Outline Pass - per Object", |host| {
            let mut object_compositor = Compositor {
                host,
                targets: compositor.targets,
                materials: compositor.materials,
            };
            for object in &objects {
                object_compositor.composite(
                    &[object.drawable()],
                    self.config.resolve(Some(object.settings())),
                );
            }
        });
    }
}

impl Drop for OutlinePass {
    fn drop(&mut self) {
        if self.targets.is_some() {
            re_log::warn!("Outline pass dropped without camera cleanup, leaking its scratch targets");
        }
    }
}
