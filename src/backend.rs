//! Render Backend Interface
//!
//! The rasterization pipeline (scene traversal, visibility culling, light
//! accumulation, shader plumbing) lives behind [`RenderBackend`]. The
//! orchestrator only ever drives it through this trait: one `render` call per
//! eye per frame, plus viewport-bound pipeline lifecycle, offscreen HDR
//! targets for the environment bake, and the handful of global scene inputs
//! (fog, sun, ambient, environment cube).
//!
//! The trait is deliberately object-safe and carries no GPU types; a real
//! implementation wraps the engine's renderer, a test implementation records
//! calls.

use glam::Vec3;

use crate::camera::CameraDescriptor;
use crate::env_cube::CubeImage;
use crate::errors::Result;
use crate::shadow::{LightId, ShadowCaptureSink};

/// Handle to a viewport-bound pipeline instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineId(pub u64);

/// Handle to an offscreen HDR render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// Where a pipeline's viewport lives: the output window or an offscreen
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTargetRef {
    Window,
    Offscreen(TargetId),
}

/// Normalized viewport rectangle within a render target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    /// The whole target.
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Batch and triangle counts of one pipeline invocation (or one shadow
/// cascade pass).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub batches: u32,
    pub triangles: u32,
}

/// The five fog-call scalars, in their fixed slot order.
///
/// The backend's fog call is the single channel carrying fog density and the
/// tone-grading parameters; [`RenderBackend::set_fog`] always receives the
/// complete set so the backend never sees a stale combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogParams {
    pub density: f32,
    pub env_brightness: f32,
    pub exposure: f32,
    pub contrast: f32,
    pub saturation: f32,
}

/// The rasterization pipeline, as consumed by the orchestrator.
pub trait RenderBackend {
    /// Creates a pipeline instance bound to a fresh viewport on `target`.
    ///
    /// Viewports on the same target stack by `z_order`; the orchestrator
    /// renders lower z-orders first.
    fn create_pipeline(
        &mut self,
        name: &str,
        target: RenderTargetRef,
        viewport: ViewportRect,
        z_order: u32,
    ) -> Result<PipelineId>;

    /// Destroys a pipeline and its viewport. Unknown ids are ignored.
    fn destroy_pipeline(&mut self, pipeline: PipelineId);

    /// Draws the scene through `camera` into the pipeline's viewport.
    ///
    /// With `anaglyph_composite` set, output is composited over the target's
    /// existing contents using the camera's color mask instead of replacing
    /// them (the right eye of an anaglyph pair).
    fn render(
        &mut self,
        pipeline: PipelineId,
        camera: &CameraDescriptor,
        anaglyph_composite: bool,
    ) -> Result<RenderStats>;

    /// Creates an offscreen render target with linear float RGB storage.
    fn create_hdr_target(&mut self, width: u32, height: u32) -> Result<TargetId>;

    /// Destroys an offscreen target. Unknown ids are ignored.
    fn destroy_target(&mut self, target: TargetId);

    /// Reads an offscreen target back to host memory as linear RGB floats,
    /// row-major, top row first, `width × height × 3` values.
    fn read_hdr_target(&mut self, target: TargetId) -> Result<Vec<f32>>;

    /// Feeds the animation clock: seconds since the previous tick and the
    /// monotonic total. Called once per tick, rendered or not.
    fn advance_time(&mut self, elapsed: f32, time_since_start: f32);

    /// Pushes the composite fog/tone state. Always receives all five scalars.
    fn set_fog(&mut self, color: Vec3, params: FogParams);

    fn set_sun_diffuse(&mut self, color: Vec3);
    fn set_sun_specular(&mut self, color: Vec3);
    /// `direction` is a unit vector pointing the way the light shines.
    fn set_sun_direction(&mut self, direction: Vec3);
    fn set_ambient_light(&mut self, color: Vec3);

    /// Replaces the contents of the backend's environment cube texture in
    /// place, keeping existing references to it valid.
    fn upload_env_cube(&mut self, cube: &CubeImage) -> Result<()>;

    /// Identity of the backend's designated sun light, whose shadow cascades
    /// the orchestrator tracks.
    fn sun_light(&self) -> LightId;

    /// Installs the sink the backend reports shadow cascade captures
    /// through.
    fn set_shadow_sink(&mut self, sink: ShadowCaptureSink);

    /// Stats of the most recent shadow pass for one cascade.
    fn shadow_stats(&self, cascade: usize) -> RenderStats;
}
