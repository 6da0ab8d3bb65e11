use crate::{
    CameraDescriptor, FilterMode, RenderHost, ScratchTargetDesc, TargetFormat, TargetHandle,
    shader_interface,
};

/// The scratch targets an outline pass composites through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScratchTarget {
    /// Raw silhouette in precise mode, dilated mask while applying the outline.
    Temp,

    /// Hidden geometry that is applied to the color target.
    Temp2,

    /// Silhouette mask the outline is derived from.
    Mask,

    /// The complementary (hidden) part of the silhouette.
    HiddenMask,

    /// Hidden geometry drawn with the hidden material.
    Hidden,
}

impl ScratchTarget {
    pub const ALL: [Self; 5] = [
        Self::Temp,
        Self::Temp2,
        Self::Mask,
        Self::HiddenMask,
        Self::Hidden,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Temp => "_TempTex",
            Self::Temp2 => "_Temp2Tex",
            Self::Mask => "_MaskTex",
            Self::HiddenMask => shader_interface::HIDDEN_MASK_TEX,
            Self::Hidden => shader_interface::HIDDEN_TEX,
        }
    }

    /// Same size as the camera, 8 bit RGBA, no multisampling, no depth.
    pub fn desc(self, resolution_in_pixel: glam::UVec2) -> ScratchTargetDesc {
        ScratchTargetDesc {
            label: self.label(),
            resolution_in_pixel,
            format: TargetFormat::Rgba8Unorm,
            sample_count: 1,
            depth_bits: 0,
            filter: FilterMode::Bilinear,
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Every target a single camera's outline frame touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTargets {
    pub color: TargetHandle,
    pub depth: TargetHandle,
    scratch: [TargetHandle; ScratchTarget::ALL.len()],
}

impl FrameTargets {
    pub fn allocate<H: RenderHost + ?Sized>(host: &mut H, camera: &CameraDescriptor) -> Self {
        re_tracing::profile_function!();

        let scratch = ScratchTarget::ALL
            .map(|target| host.allocate_scratch_target(&target.desc(camera.resolution_in_pixel)));

        Self {
            color: camera.color_target,
            depth: camera.depth_target,
            scratch,
        }
    }

    /// Returns all scratch targets to the host. The camera's own targets are left alone.
    pub fn release<H: RenderHost + ?Sized>(self, host: &mut H) {
        re_tracing::profile_function!();

        for target in self.scratch {
            host.release_scratch_target(target);
        }
    }
}

impl std::ops::Index<ScratchTarget> for FrameTargets {
    type Output = TargetHandle;

    #[inline]
    fn index(&self, target: ScratchTarget) -> &TargetHandle {
        &self.scratch[target.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_declaration_order() {
        for (i, target) in ScratchTarget::ALL.into_iter().enumerate() {
            assert_eq!(target.slot(), i);
        }
    }

    #[test]
    fn scratch_targets_match_camera_resolution() {
        let desc = ScratchTarget::Mask.desc(glam::uvec2(640, 480));
        assert_eq!(desc.label, "_MaskTex");
        assert_eq!(desc.resolution_in_pixel, glam::uvec2(640, 480));
        assert_eq!(desc.format, TargetFormat::Rgba8Unorm);
        assert_eq!(desc.sample_count, 1);
        assert_eq!(desc.depth_bits, 0);
        assert_eq!(desc.filter, FilterMode::Bilinear);
    }
}
