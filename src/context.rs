//! Graphics Context
//!
//! This module contains [`GfxContext`], the per-frame orchestrator of the
//! graphics subsystem. It owns all of the subsystem's mutable state (scene
//! properties, the shadow matrix tracker, the eye render targets, the
//! environment cube) and drives the render backend once per eye per tick.
//!
//! # Architecture
//!
//! - **`RenderBackend`**: draws a scene given a camera descriptor
//! - **`OutputSurface`**: window activity, buffer swap, event pump
//! - **`OptionSource`**: read-only stereo/feature configuration
//!
//! # Lifecycle
//!
//! 1. Create with [`GfxContext::init`]
//! 2. Call [`render_frame`](GfxContext::render_frame) once per host tick
//! 3. Adjust scene properties at any time between frames
//! 4. Shut down with [`shutdown`](GfxContext::shutdown) (also runs on drop)
//!
//! # Frame behavior
//!
//! A tick first pumps surface events, then either renders (surface active)
//! or sleeps for [`IDLE_FRAME_INTERVAL`] (surface inactive, e.g. minimized).
//! Any backend or platform error inside the frame is caught at the frame
//! boundary and logged; the next tick renders normally. Errors never
//! propagate out of `render_frame` into the host loop.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::{Mat4, Quat, Vec3};

use crate::backend::RenderBackend;
use crate::bake;
use crate::camera::{self, FrameCameras};
use crate::env_cube::{EnvironmentCubeState, FLAT_CUBE_PATH};
use crate::errors::{GfxError, Result};
use crate::materials::MaterialKindRegistry;
use crate::options::{FlagOption, OptionSource};
use crate::properties::SceneProperties;
use crate::shadow::{ShadowMatrixTracker, SHADOW_CASCADES};
use crate::stats::{LastFrameStats, RunningFrameStats};
use crate::surface::{OutputSurface, SurfaceEvent};
use crate::targets::RenderTargetSet;

/// Sleep interval for ticks with an inactive output surface; a 100 fps
/// cadence keeps reactivation latency low without busy-waiting.
pub const IDLE_FRAME_INTERVAL: Duration = Duration::from_millis(10);

/// The graphics subsystem's orchestrator and state owner.
///
/// All methods run on the render thread; see the crate docs for the
/// threading model.
pub struct GfxContext<B, S, O>
where
    B: RenderBackend,
    S: OutputSurface,
    O: OptionSource,
{
    backend: B,
    surface: S,
    options: O,

    properties: SceneProperties,
    shadow: ShadowMatrixTracker,
    targets: RenderTargetSet,
    env_cube: EnvironmentCubeState,
    materials: MaterialKindRegistry,

    resource_root: PathBuf,
    time_since_start: f32,
    frame_count: u64,
    last_stats: LastFrameStats,
    close_requested: bool,
    shutting_down: bool,
}

impl<B, S, O> GfxContext<B, S, O>
where
    B: RenderBackend,
    S: OutputSurface,
    O: OptionSource,
{
    /// Initializes the subsystem: wires the shadow capture channel into the
    /// backend, builds the eye pipelines for the current display mode,
    /// pushes the initial fog/tone state, and uploads the built-in flat
    /// environment cube.
    pub fn init(mut backend: B, surface: S, options: O) -> Result<Self> {
        log::info!("initializing graphics subsystem");

        let (shadow, sink) = ShadowMatrixTracker::new(backend.sun_light());
        backend.set_shadow_sink(sink);

        let mut context = Self {
            backend,
            surface,
            options,
            properties: SceneProperties::default(),
            shadow,
            targets: RenderTargetSet::new(),
            env_cube: EnvironmentCubeState::new(),
            materials: MaterialKindRegistry::new(),
            resource_root: PathBuf::from("."),
            time_since_start: 0.0,
            frame_count: 0,
            last_stats: LastFrameStats::default(),
            close_requested: false,
            shutting_down: false,
        };

        context.reconfigure()?;
        context.properties.push_fog(&mut context.backend);
        context
            .env_cube
            .set(&mut context.backend, &context.resource_root, FLAT_CUBE_PATH)?;

        Ok(context)
    }

    /// Shuts the subsystem down, releasing the eye pipelines. Idempotent;
    /// further `render_frame` calls are no-ops.
    pub fn shutdown(&mut self) {
        if self.shutting_down {
            return;
        }
        self.shutting_down = true;
        log::info!("shutting down graphics subsystem");
        self.targets.teardown(&mut self.backend);
    }

    // ========================================================================
    // Per-frame entry point
    // ========================================================================

    /// Advances time and renders one frame through the backend.
    ///
    /// `elapsed` is the seconds since the previous tick; it accumulates into
    /// the monotonic animation clock whether or not the frame renders.
    /// `camera_position`/`camera_orientation` are the host camera pose for
    /// this frame.
    ///
    /// Never fails from the host's perspective: frame-level errors are
    /// logged and the frame is treated as complete.
    pub fn render_frame(&mut self, elapsed: f32, camera_position: Vec3, camera_orientation: Quat) {
        if self.shutting_down {
            return;
        }
        self.time_since_start += elapsed;

        if let Err(e) = self.frame(elapsed, camera_position, camera_orientation) {
            log::error!("dropping frame: {e}");
        }
    }

    fn frame(&mut self, elapsed: f32, camera_position: Vec3, camera_orientation: Quat) -> Result<()> {
        // Texture animation and other time-driven backend state advance every
        // tick, active or not.
        self.backend.advance_time(elapsed, self.time_since_start);

        for event in self.surface.pump_events() {
            match event {
                SurfaceEvent::Resized { .. } => self.reconfigure()?,
                SurfaceEvent::CloseRequested => self.close_requested = true,
            }
        }

        if !self.surface.is_active() {
            self.surface.sleep(IDLE_FRAME_INTERVAL);
            return Ok(());
        }

        // Rebuild the eye pipelines if the stereo mode changed under us.
        let stereo = self.options.flag(FlagOption::Stereo);
        if self.targets.is_stereo() != stereo || self.targets.eyes().is_none() {
            self.reconfigure()?;
        }
        let Some(eyes) = self.targets.eyes() else {
            return Ok(());
        };

        let mut stats = LastFrameStats::default();
        match camera::build_frame_cameras(&self.options, camera_position, camera_orientation) {
            FrameCameras::Mono(cam) => {
                stats.left = self.backend.render(eyes.left, &cam, false)?;
            }
            FrameCameras::Stereo {
                left,
                right,
                composite_anaglyph,
            } => {
                let right_pipeline = eyes.right.ok_or_else(|| {
                    GfxError::InvariantViolation("stereo frame with a mono target set".into())
                })?;
                // The left eye completes its invocation before the right
                // begins; the backend may rely on this ordering.
                stats.left = self.backend.render(eyes.left, &left, false)?;
                stats.right = Some(self.backend.render(right_pipeline, &right, composite_anaglyph)?);
            }
        }

        self.surface.swap_buffers()?;

        self.shadow.pump();
        if self.options.flag(FlagOption::ShadowCast) {
            for cascade in 0..SHADOW_CASCADES {
                stats.shadow[cascade] = self.backend.shadow_stats(cascade);
            }
        }

        self.last_stats = stats;
        self.frame_count += 1;
        Ok(())
    }

    /// Rebuilds the eye viewports/pipelines for the current display options.
    /// Called automatically on resize and stereo-mode changes; safe to call
    /// at any time.
    pub fn reconfigure(&mut self) -> Result<()> {
        let stereo = self.options.flag(FlagOption::Stereo);
        let cross_eye = self.options.flag(FlagOption::CrossEye);
        self.targets
            .reconfigure(&mut self.backend, stereo, cross_eye)
    }

    // ========================================================================
    // Scene properties
    // ========================================================================

    #[must_use]
    pub fn sun_diffuse(&self) -> Vec3 {
        self.properties.sun_diffuse()
    }

    pub fn set_sun_diffuse(&mut self, color: Vec3) {
        self.properties.set_sun_diffuse(&mut self.backend, color);
    }

    #[must_use]
    pub fn sun_specular(&self) -> Vec3 {
        self.properties.sun_specular()
    }

    pub fn set_sun_specular(&mut self, color: Vec3) {
        self.properties.set_sun_specular(&mut self.backend, color);
    }

    #[must_use]
    pub fn sun_direction(&self) -> Vec3 {
        self.properties.sun_direction()
    }

    /// `direction` must be a unit vector.
    pub fn set_sun_direction(&mut self, direction: Vec3) {
        self.properties
            .set_sun_direction(&mut self.backend, direction);
    }

    #[must_use]
    pub fn ambient_light(&self) -> Vec3 {
        self.properties.ambient_light()
    }

    pub fn set_ambient_light(&mut self, color: Vec3) {
        self.properties.set_ambient_light(&mut self.backend, color);
    }

    #[must_use]
    pub fn fog_color(&self) -> Vec3 {
        self.properties.fog_color()
    }

    pub fn set_fog_color(&mut self, color: Vec3) {
        self.properties.set_fog_color(&mut self.backend, color);
    }

    #[must_use]
    pub fn fog_density(&self) -> f32 {
        self.properties.fog_density()
    }

    pub fn set_fog_density(&mut self, density: f32) {
        self.properties.set_fog_density(&mut self.backend, density);
    }

    #[must_use]
    pub fn env_brightness(&self) -> f32 {
        self.properties.env_brightness()
    }

    pub fn set_env_brightness(&mut self, brightness: f32) {
        self.properties
            .set_env_brightness(&mut self.backend, brightness);
    }

    #[must_use]
    pub fn exposure(&self) -> f32 {
        self.properties.exposure()
    }

    pub fn set_exposure(&mut self, exposure: f32) {
        self.properties.set_exposure(&mut self.backend, exposure);
    }

    #[must_use]
    pub fn contrast(&self) -> f32 {
        self.properties.contrast()
    }

    pub fn set_contrast(&mut self, contrast: f32) {
        self.properties.set_contrast(&mut self.backend, contrast);
    }

    #[must_use]
    pub fn saturation(&self) -> f32 {
        self.properties.saturation()
    }

    pub fn set_saturation(&mut self, saturation: f32) {
        self.properties.set_saturation(&mut self.backend, saturation);
    }

    /// The path of the current environment cube.
    #[must_use]
    pub fn env_cube(&self) -> &str {
        self.env_cube.path()
    }

    /// Loads and uploads a new environment cube; see
    /// [`EnvironmentCubeState::set`].
    pub fn set_env_cube(&mut self, path: &str) -> Result<()> {
        self.env_cube
            .set(&mut self.backend, &self.resource_root, path)
    }

    /// Sets the directory environment-cube paths resolve against.
    pub fn set_resource_root(&mut self, root: impl Into<PathBuf>) {
        self.resource_root = root.into();
    }

    // ========================================================================
    // Offline operations
    // ========================================================================

    /// Bakes a 6-face HDR environment cube of the current scene; see
    /// [`bake::bake_env_cube`].
    pub fn bake_env_cube(
        &mut self,
        output_path: &Path,
        size: u32,
        camera_position: Vec3,
        saturation: f32,
        ambient: Vec3,
    ) -> Result<()> {
        bake::bake_env_cube(
            &mut self.backend,
            output_path,
            size,
            camera_position,
            saturation,
            ambient,
        )
    }

    /// Writes the output surface's current contents to an image file.
    pub fn screenshot(&mut self, path: &Path) -> Result<()> {
        self.surface.write_contents(path)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Statistics of the most recently rendered frame.
    #[must_use]
    pub fn last_frame_stats(&self) -> LastFrameStats {
        self.last_stats
    }

    /// Counters accumulated since initialization.
    #[must_use]
    pub fn running_frame_stats(&self) -> RunningFrameStats {
        RunningFrameStats {
            frame_count: self.frame_count,
            time_since_start: self.time_since_start,
        }
    }

    /// Monotonic animation clock, in seconds. Never resets, never decreases.
    #[must_use]
    pub fn time_since_start(&self) -> f32 {
        self.time_since_start
    }

    /// The world-to-shadow-UV matrix of one sun shadow cascade.
    #[must_use]
    pub fn shadow_matrix(&self, cascade: usize) -> Mat4 {
        self.shadow.matrix(cascade)
    }

    /// All cascade matrices, indexed by cascade.
    #[must_use]
    pub fn shadow_matrices(&self) -> &[Mat4; SHADOW_CASCADES] {
        self.shadow.matrices()
    }

    /// Whether the user has asked to close the window. Latches once set.
    #[must_use]
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    #[must_use]
    pub fn materials(&self) -> &MaterialKindRegistry {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialKindRegistry {
        &mut self.materials
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Direct backend access, for hosts feeding scene data past the
    /// orchestrator.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn options(&self) -> &O {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut O {
        &mut self.options
    }
}

impl<B, S, O> Drop for GfxContext<B, S, O>
where
    B: RenderBackend,
    S: OutputSurface,
    O: OptionSource,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
