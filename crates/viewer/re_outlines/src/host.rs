//! The surface the outline pass needs from the renderer it is plugged into.
//!
//! The host owns every GPU object. The outline pass only ever sees opaque handles and issues
//! commands through [`RenderHost`], in the exact order they have to be executed.

use smallvec::SmallVec;

use crate::Layer;

/// A shader program owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ShaderId(pub u64);

/// A material owned by the host, i.e. a shader with bound parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaterialId(pub u64);

/// Something the host knows how to draw, e.g. a mesh renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub u64);

/// A render target (color or depth), either owned by the camera or a scratch target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetHandle(pub u64);

/// A drawable together with the materials of its submeshes.
///
/// The number of materials is the number of submeshes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawable {
    pub id: DrawableId,
    pub materials: SmallVec<[MaterialId; 4]>,
}

impl Drawable {
    pub fn new(id: DrawableId, materials: impl IntoIterator<Item = MaterialId>) -> Self {
        Self {
            id,
            materials: materials.into_iter().collect(),
        }
    }

    #[inline]
    pub fn submesh_count(&self) -> usize {
        self.materials.len()
    }
}

/// An object that survived the host's culling this frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneObject {
    pub drawable: Drawable,
    pub layer: Layer,
}

/// Everything the host hands to [`crate::OutlinePass::execute`] for a single frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameContext<'a> {
    /// Culled, visibility filtered scene objects.
    pub culled_objects: &'a [SceneObject],
}

/// The camera a frame is rendered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraDescriptor {
    pub resolution_in_pixel: glam::UVec2,

    /// The color target the outlines end up in.
    pub color_target: TargetHandle,

    /// The scene depth, used to restrict silhouettes to visible (or hidden) fragments.
    pub depth_target: TargetHandle,
}

/// Which shader pass of a material a draw should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderPass {
    /// Every pass of the material.
    All,

    /// A single pass.
    Index(u32),
}

/// Whether a target is cleared right after binding.
///
/// Without a clear the target's previous content is loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearAction {
    None,
    Color(ecolor::Rgba),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// 8 bit per channel, linear.
    Rgba8Unorm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Point,
    Bilinear,
}

/// Describes a transient render target that lives for the duration of one camera's frame.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScratchTargetDesc {
    /// Debug label, also the name under which the target is visible to shaders.
    pub label: &'static str,
    pub resolution_in_pixel: glam::UVec2,
    pub format: TargetFormat,
    pub sample_count: u32,

    /// Scratch targets never carry their own depth, the camera's depth target is bound instead.
    pub depth_bits: u32,
    pub filter: FilterMode,
}

/// A per-draw value passed to a shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    Color(ecolor::Rgba),
    Int(i32),
}

/// Named per-draw shader values, the equivalent of a material property block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialProperties {
    entries: SmallVec<[(&'static str, PropertyValue); 2]>,
}

impl MaterialProperties {
    /// Sets a value, replacing any previous value of the same name.
    pub fn set(&mut self, name: &'static str, value: PropertyValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.entries
            .iter()
            .find_map(|(n, value)| (*n == name).then_some(*value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, PropertyValue)> + '_ {
        self.entries.iter().copied()
    }
}

/// Command submission interface of the host renderer.
///
/// All calls are recorded onto a single command stream in the order they are made.
/// [`RenderHost::execute`] hands everything recorded so far to the GPU queue.
///
/// There is no way to set global floats: the only one ever needed was the alpha cutoff, and
/// alpha tested silhouettes are not supported. There is no load action either, binding always
/// loads the previous content unless [`ClearAction::Color`] is passed.
pub trait RenderHost {
    /// Creates a material from one of the shaders referenced by the pass configuration.
    fn create_engine_material(&mut self, shader: ShaderId) -> MaterialId;

    fn allocate_scratch_target(&mut self, desc: &ScratchTargetDesc) -> TargetHandle;

    fn release_scratch_target(&mut self, target: TargetHandle);

    /// Makes `color` the current render target, optionally with a depth target.
    fn bind_target(
        &mut self,
        color: TargetHandle,
        depth: Option<TargetHandle>,
        clear: ClearAction,
    );

    /// Exposes a target to all subsequent shader invocations under `name`.
    fn set_global_texture(&mut self, name: &'static str, target: TargetHandle);

    /// Draws a single submesh of a drawable with the given material.
    fn draw_renderer(
        &mut self,
        drawable: DrawableId,
        material: MaterialId,
        submesh_index: u32,
        pass: ShaderPass,
    );

    /// Draws a full screen triangle into the current render target.
    fn draw_fullscreen(
        &mut self,
        material: MaterialId,
        pass_index: u32,
        properties: Option<&MaterialProperties>,
    );

    /// Submits everything recorded so far.
    fn execute(&mut self);

    /// Opens a named group, shown in graphics debuggers and GPU profilers.
    fn push_debug_group(&mut self, _label: &str) {}

    fn pop_debug_group(&mut self) {}
}

/// Runs `f` inside a debug group named `label`.
pub(crate) fn with_debug_group<H: RenderHost + ?Sized, R>(
    host: &mut H,
    label: &str,
    f: impl FnOnce(&mut H) -> R,
) -> R {
    re_tracing::profile_scope!("debug_group", label);
    host.push_debug_group(label);
    let result = f(host);
    host.pop_debug_group();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_properties_replace_by_name() {
        let mut props = MaterialProperties::default();
        props.set("_OutlineColor", PropertyValue::Color(ecolor::Rgba::RED));
        props.set("_SizeId", PropertyValue::Int(1));
        props.set("_OutlineColor", PropertyValue::Color(ecolor::Rgba::BLUE));

        assert_eq!(props.iter().count(), 2);
        assert_eq!(
            props.get("_OutlineColor"),
            Some(PropertyValue::Color(ecolor::Rgba::BLUE))
        );
        assert_eq!(props.get("_SizeId"), Some(PropertyValue::Int(1)));
        assert_eq!(props.get("_Missing"), None);
    }
}
