//! Silhouette outlines for a real-time renderer.
//!
//! Draws a solid colored outline around registered objects, and around every object on a
//! selected set of scene layers, by compositing a handful of screen-space passes.
//! Optionally the part of an object hidden behind other geometry is revealed as well.
//!
//! The crate never touches the GPU itself: everything goes through a [`RenderHost`]
//! implemented by the renderer the outline pass is plugged into.
//!
//! ```
//! use re_outlines::{
//!     Drawable, DrawableId, FrameContext, MaterialId, ObjectSettings, OutlineFeature,
//!     OutlineRegistry, OutlinedObject, PassConfiguration, RecordingHost, ShaderId,
//! };
//! use std::sync::Arc;
//!
//! let mut host = RecordingHost::default();
//! let registry = OutlineRegistry::new_shared();
//! let config = PassConfiguration {
//!     outline_shader: Some(ShaderId(1)),
//!     mask_shader: Some(ShaderId(2)),
//!     ..Default::default()
//! };
//!
//! let mut feature = OutlineFeature::create("selection", config, registry.clone(), &mut host);
//!
//! let object = Arc::new(OutlinedObject::new(
//!     Drawable::new(DrawableId(0), [MaterialId(0)]),
//!     ObjectSettings::Inherited,
//! ));
//! let _active = registry.activate(&object);
//!
//! let camera = host.camera(glam::uvec2(1920, 1080));
//! if let Some(pass) = feature.pass_mut() {
//!     pass.on_camera_setup(&mut host, &camera);
//!     pass.execute(&mut host, &FrameContext::default());
//!     pass.on_camera_cleanup(&mut host);
//! }
//! assert_eq!(host.live_scratch_targets().count(), 0);
//! ```

mod compositor;
mod config;
mod error;
mod feature;
mod frame_targets;
mod host;
mod layer;
mod outline_pass;
mod registry;
mod settings;

pub mod recording;
pub mod shader_interface;

pub use self::{
    config::{PassConfiguration, RenderPassEvent},
    error::{InvalidOutlineSize, OutlineFeatureError, ShaderSlot},
    feature::OutlineFeature,
    frame_targets::ScratchTarget,
    host::{
        CameraDescriptor, ClearAction, Drawable, DrawableId, FilterMode, FrameContext,
        MaterialId, MaterialProperties, PropertyValue, RenderHost, SceneObject, ScratchTargetDesc,
        ShaderId, ShaderPass, TargetFormat, TargetHandle,
    },
    layer::{Layer, LayerMask},
    outline_pass::OutlinePass,
    recording::RecordingHost,
    registry::{
        ActiveOutline, OutlineRegistry, OutlinedObject, OutlinedObjectId, SharedOutlineRegistry,
    },
    settings::{
        DepthBinding, HiddenMaterialOverride, ObjectSettings, OutlineFlags, OutlineSettings,
        OutlineSize, ResolvedOutline,
    },
};

#[cfg(feature = "serde")]
pub use self::error::ConfigError;
