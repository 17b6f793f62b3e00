//! Shared mock collaborators for the integration tests.
//!
//! `MockBackend` and `MockSurface` record every call the orchestrator makes
//! so tests can assert on invocation order, counts, and payloads without a
//! GPU or a window.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec3;

use ember_gfx::backend::{
    FogParams, PipelineId, RenderBackend, RenderStats, RenderTargetRef, TargetId, ViewportRect,
};
use ember_gfx::camera::CameraDescriptor;
use ember_gfx::env_cube::CubeImage;
use ember_gfx::errors::{GfxError, Result};
use ember_gfx::shadow::{LightId, ShadowCaptureSink};
use ember_gfx::surface::{OutputSurface, SurfaceEvent};

/// One recorded `render` invocation.
#[derive(Clone)]
pub struct RenderCall {
    pub pipeline: PipelineId,
    pub name: String,
    pub target: RenderTargetRef,
    pub viewport: ViewportRect,
    pub camera: CameraDescriptor,
    pub anaglyph_composite: bool,
}

/// How `read_hdr_target` synthesizes pixel data.
#[derive(Clone, Copy)]
pub enum HdrFill {
    /// Every pixel gets this linear RGB value.
    Solid([f32; 3]),
    /// Red channel = source row index, green/blue zero. For orientation
    /// tests.
    RowRamp,
}

pub struct MockBackend {
    next_id: u64,
    pub live_pipelines: Vec<(PipelineId, String, RenderTargetRef, ViewportRect, u32)>,
    pub pipelines_created: u64,
    pub pipelines_destroyed: u64,
    pub live_targets: Vec<(TargetId, u32, u32)>,
    pub targets_created: u64,
    pub render_log: Vec<RenderCall>,
    pub time_updates: Vec<(f32, f32)>,
    pub fog_pushes: Vec<(Vec3, FogParams)>,
    pub sun_diffuse_pushes: Vec<Vec3>,
    pub sun_specular_pushes: Vec<Vec3>,
    pub sun_direction_pushes: Vec<Vec3>,
    pub ambient_pushes: Vec<Vec3>,
    pub cube_uploads: Vec<CubeImage>,
    pub sink: Option<ShadowCaptureSink>,
    pub cascade_stats: [RenderStats; 3],
    pub hdr_fill: HdrFill,
    /// Fail the Nth render call (0-based) and every one after it.
    pub fail_renders_from: Option<usize>,
    pub sun: LightId,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live_pipelines: Vec::new(),
            pipelines_created: 0,
            pipelines_destroyed: 0,
            live_targets: Vec::new(),
            targets_created: 0,
            render_log: Vec::new(),
            time_updates: Vec::new(),
            fog_pushes: Vec::new(),
            sun_diffuse_pushes: Vec::new(),
            sun_specular_pushes: Vec::new(),
            sun_direction_pushes: Vec::new(),
            ambient_pushes: Vec::new(),
            cube_uploads: Vec::new(),
            sink: None,
            cascade_stats: [RenderStats::default(); 3],
            hdr_fill: HdrFill::Solid([0.0, 0.0, 0.0]),
            fail_renders_from: None,
            sun: LightId(1),
        }
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RenderBackend for MockBackend {
    fn create_pipeline(
        &mut self,
        name: &str,
        target: RenderTargetRef,
        viewport: ViewportRect,
        z_order: u32,
    ) -> Result<PipelineId> {
        let id = PipelineId(self.fresh_id());
        self.live_pipelines
            .push((id, name.to_owned(), target, viewport, z_order));
        self.pipelines_created += 1;
        Ok(id)
    }

    fn destroy_pipeline(&mut self, pipeline: PipelineId) {
        let before = self.live_pipelines.len();
        self.live_pipelines.retain(|(id, ..)| *id != pipeline);
        if self.live_pipelines.len() < before {
            self.pipelines_destroyed += 1;
        }
    }

    fn render(
        &mut self,
        pipeline: PipelineId,
        camera: &CameraDescriptor,
        anaglyph_composite: bool,
    ) -> Result<RenderStats> {
        if let Some(from) = self.fail_renders_from {
            if self.render_log.len() >= from {
                return Err(GfxError::Backend("mock render failure".into()));
            }
        }
        let (_, name, target, viewport, _) = self
            .live_pipelines
            .iter()
            .find(|(id, ..)| *id == pipeline)
            .expect("render on a destroyed pipeline")
            .clone();
        self.render_log.push(RenderCall {
            pipeline,
            name,
            target,
            viewport,
            camera: *camera,
            anaglyph_composite,
        });
        Ok(RenderStats {
            batches: 10,
            triangles: 1000,
        })
    }

    fn create_hdr_target(&mut self, width: u32, height: u32) -> Result<TargetId> {
        let id = TargetId(self.fresh_id());
        self.live_targets.push((id, width, height));
        self.targets_created += 1;
        Ok(id)
    }

    fn destroy_target(&mut self, target: TargetId) {
        self.live_targets.retain(|(id, ..)| *id != target);
    }

    fn read_hdr_target(&mut self, target: TargetId) -> Result<Vec<f32>> {
        let &(_, width, height) = self
            .live_targets
            .iter()
            .find(|(id, ..)| *id == target)
            .expect("readback on a destroyed target");
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for _x in 0..width {
                match self.hdr_fill {
                    HdrFill::Solid(rgb) => data.extend_from_slice(&rgb),
                    HdrFill::RowRamp => data.extend_from_slice(&[y as f32, 0.0, 0.0]),
                }
            }
        }
        Ok(data)
    }

    fn advance_time(&mut self, elapsed: f32, time_since_start: f32) {
        self.time_updates.push((elapsed, time_since_start));
    }

    fn set_fog(&mut self, color: Vec3, params: FogParams) {
        self.fog_pushes.push((color, params));
    }

    fn set_sun_diffuse(&mut self, color: Vec3) {
        self.sun_diffuse_pushes.push(color);
    }

    fn set_sun_specular(&mut self, color: Vec3) {
        self.sun_specular_pushes.push(color);
    }

    fn set_sun_direction(&mut self, direction: Vec3) {
        self.sun_direction_pushes.push(direction);
    }

    fn set_ambient_light(&mut self, color: Vec3) {
        self.ambient_pushes.push(color);
    }

    fn upload_env_cube(&mut self, cube: &CubeImage) -> Result<()> {
        self.cube_uploads.push(cube.clone());
        Ok(())
    }

    fn sun_light(&self) -> LightId {
        self.sun
    }

    fn set_shadow_sink(&mut self, sink: ShadowCaptureSink) {
        self.sink = Some(sink);
    }

    fn shadow_stats(&self, cascade: usize) -> RenderStats {
        self.cascade_stats[cascade]
    }
}

pub struct MockSurface {
    pub active: bool,
    pub size: (u32, u32),
    pub swaps: u64,
    pub sleeps: Vec<Duration>,
    pub queued_events: Vec<SurfaceEvent>,
    pub screenshots: Vec<PathBuf>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self {
            active: true,
            size: (1280, 720),
            swaps: 0,
            sleeps: Vec::new(),
            queued_events: Vec::new(),
            screenshots: Vec::new(),
        }
    }
}

impl OutputSurface for MockSurface {
    fn is_active(&self) -> bool {
        self.active
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.swaps += 1;
        Ok(())
    }

    fn pump_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.queued_events)
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }

    fn write_contents(&mut self, path: &Path) -> Result<()> {
        self.screenshots.push(path.to_owned());
        Ok(())
    }
}
