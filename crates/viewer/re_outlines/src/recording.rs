//! A [`RenderHost`] that records every command instead of executing it.
//!
//! Used by the tests, and handy for dumping what a frame would submit.

use std::collections::BTreeMap;

use crate::{
    CameraDescriptor, ClearAction, DrawableId, MaterialId, MaterialProperties, RenderHost,
    ScratchTargetDesc, ShaderId, ShaderPass, TargetHandle,
};

/// A single recorded [`RenderHost`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    CreateMaterial {
        shader: ShaderId,
        material: MaterialId,
    },
    AllocateScratchTarget {
        desc: ScratchTargetDesc,
        target: TargetHandle,
    },
    ReleaseScratchTarget(TargetHandle),
    BindTarget {
        color: TargetHandle,
        depth: Option<TargetHandle>,
        clear: ClearAction,
    },
    SetGlobalTexture {
        name: &'static str,
        target: TargetHandle,
    },
    DrawRenderer {
        drawable: DrawableId,
        material: MaterialId,
        submesh_index: u32,
        pass: ShaderPass,
    },
    DrawFullscreen {
        material: MaterialId,
        pass_index: u32,
        properties: Option<MaterialProperties>,
    },
    Execute,
    PushDebugGroup(String),
    PopDebugGroup,
}

#[derive(Debug)]
pub struct RecordingHost {
    commands: Vec<Command>,
    next_handle: u64,

    /// Scratch targets that were allocated and not yet released.
    live_targets: BTreeMap<TargetHandle, &'static str>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            next_handle: Self::FIRST_HANDLE,
            live_targets: BTreeMap::default(),
        }
    }
}

impl RecordingHost {
    /// Handles the host creates itself (materials, targets) start here.
    pub const FIRST_HANDLE: u64 = 0x1000;

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns everything recorded so far and starts over with an empty list.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// A camera with freshly created color & depth targets.
    pub fn camera(&mut self, resolution_in_pixel: glam::UVec2) -> CameraDescriptor {
        CameraDescriptor {
            resolution_in_pixel,
            color_target: TargetHandle(self.next_handle()),
            depth_target: TargetHandle(self.next_handle()),
        }
    }

    /// The material created for `shader`, if any.
    pub fn material_of(&self, shader: ShaderId) -> Option<MaterialId> {
        self.commands.iter().find_map(|command| match command {
            Command::CreateMaterial {
                shader: s,
                material,
            } if *s == shader => Some(*material),
            _ => None,
        })
    }

    /// The most recently allocated live scratch target with the given label.
    pub fn scratch_target(&self, label: &str) -> Option<TargetHandle> {
        self.live_targets
            .iter()
            .rev()
            .find_map(|(target, l)| (*l == label).then_some(*target))
    }

    pub fn live_scratch_targets(&self) -> impl Iterator<Item = (TargetHandle, &'static str)> + '_ {
        self.live_targets
            .iter()
            .map(|(target, label)| (*target, *label))
    }

    pub fn draw_renderer_calls(
        &self,
    ) -> impl Iterator<Item = (DrawableId, MaterialId, u32, ShaderPass)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            Command::DrawRenderer {
                drawable,
                material,
                submesh_index,
                pass,
            } => Some((*drawable, *material, *submesh_index, *pass)),
            _ => None,
        })
    }

    pub fn fullscreen_calls(
        &self,
    ) -> impl Iterator<Item = (MaterialId, u32, Option<&MaterialProperties>)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            Command::DrawFullscreen {
                material,
                pass_index,
                properties,
            } => Some((*material, *pass_index, properties.as_ref())),
            _ => None,
        })
    }

    /// All bind calls, as `(color, depth)`.
    pub fn binds(&self) -> impl Iterator<Item = (TargetHandle, Option<TargetHandle>)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            Command::BindTarget { color, depth, .. } => Some((*color, *depth)),
            _ => None,
        })
    }

    fn next_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl RenderHost for RecordingHost {
    fn create_engine_material(&mut self, shader: ShaderId) -> MaterialId {
        let material = MaterialId(self.next_handle());
        self.commands
            .push(Command::CreateMaterial { shader, material });
        material
    }

    fn allocate_scratch_target(&mut self, desc: &ScratchTargetDesc) -> TargetHandle {
        let target = TargetHandle(self.next_handle());
        self.live_targets.insert(target, desc.label);
        self.commands.push(Command::AllocateScratchTarget {
            desc: desc.clone(),
            target,
        });
        target
    }

    fn release_scratch_target(&mut self, target: TargetHandle) {
        if self.live_targets.remove(&target).is_none() {
            re_log::warn!("Releasing unknown scratch target {target:?}");
        }
        self.commands.push(Command::ReleaseScratchTarget(target));
    }

    fn bind_target(&mut self, color: TargetHandle, depth: Option<TargetHandle>, clear: ClearAction) {
        self.commands.push(Command::BindTarget {
            color,
            depth,
            clear,
        });
    }

    fn set_global_texture(&mut self, name: &'static str, target: TargetHandle) {
        self.commands
            .push(Command::SetGlobalTexture { name, target });
    }

    fn draw_renderer(
        &mut self,
        drawable: DrawableId,
        material: MaterialId,
        submesh_index: u32,
        pass: ShaderPass,
    ) {
        self.commands.push(Command::DrawRenderer {
            drawable,
            material,
            submesh_index,
            pass,
        });
    }

    fn draw_fullscreen(
        &mut self,
        material: MaterialId,
        pass_index: u32,
        properties: Option<&MaterialProperties>,
    ) {
        self.commands.push(Command::DrawFullscreen {
            material,
            pass_index,
            properties: properties.cloned(),
        });
    }

    fn execute(&mut self) {
        self.commands.push(Command::Execute);
    }

    fn push_debug_group(&mut self, label: &str) {
        self.commands.push(Command::PushDebugGroup(label.to_owned()));
    }

    fn pop_debug_group(&mut self) {
        self.commands.push(Command::PopDebugGroup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let mut host = RecordingHost::default();
        let camera = host.camera(glam::uvec2(4, 4));
        let material = host.create_engine_material(ShaderId(0));

        assert_ne!(camera.color_target, camera.depth_target);
        assert!(material.0 >= RecordingHost::FIRST_HANDLE);
        assert_eq!(host.material_of(ShaderId(0)), Some(material));
        assert_eq!(host.material_of(ShaderId(1)), None);
    }
}
