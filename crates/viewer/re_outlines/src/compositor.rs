//! The compositing steps shared by layer and per-object outlines.
//!
//! Every outline goes through the same sequence of passes:
//! ```text
//!  silhouette draws ──▶ mask ──────────────┬──▶ dilate ──▶ composite onto color
//!                        │                 │
//!                        └─▶ hidden reveal ┴──▶ hidden geometry onto color
//! ```
//! In precise mode the silhouette is first drawn with the object's own materials into `temp` and
//! then turned into a mask. Otherwise it is drawn straight into `mask` with the mask material.

use crate::{
    ClearAction, Drawable, MaterialId, MaterialProperties, RenderHost, ResolvedOutline, ShaderPass,
    TargetHandle,
    frame_targets::{FrameTargets, ScratchTarget},
    host::with_debug_group,
    settings::{DepthBinding, OutlineSettings},
    shader_interface::{self, MaskShaderPass, OutlineShaderPass},
};

/// Materials created from the two shaders of a [`crate::PassConfiguration`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PassMaterials {
    pub outline: MaterialId,
    pub mask: MaterialId,
}

/// Issues the commands of a single outline composition against a host.
pub(crate) struct Compositor<'a, H: RenderHost + ?Sized> {
    pub host: &'a mut H,
    pub targets: &'a FrameTargets,
    pub materials: PassMaterials,
}

impl<H: RenderHost + ?Sized> Compositor<'_, H> {
    /// Outlines everything in `drawables` as one shape, using `outline`.
    pub fn composite(&mut self, drawables: &[&Drawable], outline: ResolvedOutline<'_>) {
        re_tracing::profile_function!();

        let settings = outline.settings;
        let depth_binding = settings.depth_binding();

        self.setup_targets(settings, depth_binding);

        with_debug_group(self.host, "Render object", |host| {
            draw_silhouettes(host, self.materials.mask, drawables, settings);
        });

        if settings.is_precise() {
            self.mask_from_temp();
        }

        if settings.shows_hidden() {
            self.reveal_hidden(drawables, outline, depth_binding);
        }

        self.blit(
            ScratchTarget::Temp2,
            self.targets.color,
            self.materials.mask,
            MaskShaderPass::ApplyToColor.index(),
            None,
        );

        self.apply_outline(&settings.properties());
    }

    fn setup_targets(&mut self, settings: &OutlineSettings, depth_binding: DepthBinding) {
        let scene_depth = depth_binding
            .scene_pass_uses_depth()
            .then_some(self.targets.depth);

        self.bind_and_clear(ScratchTarget::Temp2, None);
        if settings.is_precise() {
            self.bind_and_clear(ScratchTarget::Mask, None);
            self.bind_and_clear(ScratchTarget::Temp, scene_depth);
        } else {
            // The silhouette goes straight into the mask.
            self.bind_and_clear(ScratchTarget::Temp, None);
            self.bind_and_clear(ScratchTarget::Mask, scene_depth);
        }

        self.host.execute();
    }

    fn mask_from_temp(&mut self) {
        let mask = self.targets[ScratchTarget::Mask];
        with_debug_group(self.host, "Mask objects", |host| {
            blit(
                host,
                self.targets[ScratchTarget::Temp],
                mask,
                self.materials.mask,
                MaskShaderPass::MaskFromColor.index(),
                None,
            );
        });

        self.host.execute();
    }

    /// Draws the part of the silhouette the scene pass didn't see, plus the hidden geometry.
    fn reveal_hidden(
        &mut self,
        drawables: &[&Drawable],
        outline: ResolvedOutline<'_>,
        depth_binding: DepthBinding,
    ) {
        re_tracing::profile_function!();

        let hidden_depth = depth_binding
            .hidden_pass_uses_depth()
            .then_some(self.targets.depth);

        self.bind_and_clear(ScratchTarget::HiddenMask, hidden_depth);
        self.host.execute();

        // Always a flat mask, the composite samples it as one.
        draw_masks(self.host, self.materials.mask, drawables);

        self.bind_and_clear(ScratchTarget::Hidden, None);
        self.host.execute();

        if let Some(hidden_material) = outline.hidden_material {
            for drawable in drawables {
                for submesh_index in 0..drawable.submesh_count() {
                    self.host.draw_renderer(
                        drawable.id,
                        hidden_material,
                        submesh_index as u32,
                        ShaderPass::All,
                    );
                }
            }
        } else {
            re_log::warn_once!(
                "Outline shows hidden geometry but no hidden material is assigned, skipping it"
            );
        }

        let (hidden_mask, hidden) = (
            self.targets[ScratchTarget::HiddenMask],
            self.targets[ScratchTarget::Hidden],
        );
        let (mask, temp2) = (
            self.targets[ScratchTarget::Mask],
            self.targets[ScratchTarget::Temp2],
        );
        with_debug_group(self.host, "Mask hidden", |host| {
            host.set_global_texture(shader_interface::HIDDEN_MASK_TEX, hidden_mask);
            host.set_global_texture(shader_interface::HIDDEN_TEX, hidden);
            blit(
                host,
                mask,
                temp2,
                self.materials.mask,
                MaskShaderPass::CompositeHidden.index(),
                None,
            );
        });

        self.host.execute();
    }

    fn apply_outline(&mut self, properties: &MaterialProperties) {
        let (mask, temp, color) = (
            self.targets[ScratchTarget::Mask],
            self.targets[ScratchTarget::Temp],
            self.targets.color,
        );
        let material = self.materials.outline;

        with_debug_group(self.host, "Apply outline", |host| {
            blit(
                host,
                mask,
                temp,
                material,
                OutlineShaderPass::Dilate.index(),
                Some(properties),
            );
            blit(
                host,
                temp,
                color,
                material,
                OutlineShaderPass::Composite.index(),
                Some(properties),
            );
        });

        self.host.execute();
    }

    fn bind_and_clear(&mut self, target: ScratchTarget, depth: Option<TargetHandle>) {
        self.host.bind_target(
            self.targets[target],
            depth,
            ClearAction::Color(ecolor::Rgba::TRANSPARENT),
        );
    }

    fn blit(
        &mut self,
        source: ScratchTarget,
        destination: TargetHandle,
        material: MaterialId,
        pass_index: u32,
        properties: Option<&MaterialProperties>,
    ) {
        blit(
            self.host,
            self.targets[source],
            destination,
            material,
            pass_index,
            properties,
        );
    }
}

/// Draws the silhouette of every drawable into the currently bound target.
fn draw_silhouettes<H: RenderHost + ?Sized>(
    host: &mut H,
    mask_material: MaterialId,
    drawables: &[&Drawable],
    settings: &OutlineSettings,
) {
    if !settings.is_precise() {
        draw_masks(host, mask_material, drawables);
        return;
    }

    for drawable in drawables {
        for (submesh_index, &material) in drawable.materials.iter().enumerate() {
            for &pass in settings.shader_passes_for_submesh(submesh_index) {
                host.draw_renderer(
                    drawable.id,
                    material,
                    submesh_index as u32,
                    ShaderPass::Index(pass),
                );
            }
        }
    }
}

/// Draws every submesh with the mask material.
fn draw_masks<H: RenderHost + ?Sized>(
    host: &mut H,
    mask_material: MaterialId,
    drawables: &[&Drawable],
) {
    for drawable in drawables {
        for submesh_index in 0..drawable.submesh_count() {
            host.draw_renderer(
                drawable.id,
                mask_material,
                submesh_index as u32,
                ShaderPass::Index(MaskShaderPass::Silhouette.index()),
            );
        }
    }
}

/// Full screen pass from `source` into `destination`, keeping the destination's content.
fn blit<H: RenderHost + ?Sized>(
    host: &mut H,
    source: TargetHandle,
    destination: TargetHandle,
    material: MaterialId,
    pass_index: u32,
    properties: Option<&MaterialProperties>,
) {
    host.bind_target(destination, None, ClearAction::None);
    host.set_global_texture(shader_interface::MAIN_TEX, source);
    host.draw_fullscreen(material, pass_index, properties);
}
