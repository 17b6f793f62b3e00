//! Render Option Lookups
//!
//! The orchestrator never caches display or stereo configuration: every frame
//! it reads the values it needs through [`OptionSource`], so an option change
//! made between frames takes effect on the next frame without any
//! invalidation protocol.
//!
//! [`GfxOptions`] is the built-in plain-data store for hosts that do not have
//! their own option system. Hosts with an existing configuration subsystem
//! implement [`OptionSource`] directly over it.

use serde::{Deserialize, Serialize};

/// Scalar (float) option keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarOption {
    /// Vertical field of view, in degrees.
    FovY,
    NearClip,
    FarClip,
    /// Physical height of the monitor, in meters.
    MonitorHeight,
    /// Distance from the viewer's eyes to the monitor, in meters.
    MonitorEyeDistance,
    /// Interocular distance of the viewer, in meters.
    EyeSeparation,
    /// Closest depth the stereo effect should reproduce, in meters.
    MinPerceivedDepth,
    /// Farthest depth the stereo effect should reproduce, in meters.
    MaxPerceivedDepth,
    AnaglyphLeftRedMask,
    AnaglyphLeftGreenMask,
    AnaglyphLeftBlueMask,
    AnaglyphRightRedMask,
    AnaglyphRightGreenMask,
    AnaglyphRightBlueMask,
    /// How much color to strip from both eyes to reduce retinal rivalry.
    AnaglyphDesaturation,
}

/// Boolean option keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagOption {
    Stereo,
    /// Side-by-side split-screen stereo instead of overlapping eyes.
    CrossEye,
    Anaglyph,
    /// Bloom and tone mapping.
    PostProcessing,
    RenderParticles,
    PointLights,
    RenderSky,
    ShadowCast,
}

/// Read-only scalar/flag lookups consumed by the orchestrator.
pub trait OptionSource {
    fn scalar(&self, option: ScalarOption) -> f32;
    fn flag(&self, option: FlagOption) -> bool;
}

/// Built-in option store with engine defaults.
///
/// A plain value type: mutate the fields directly and the next frame picks
/// the changes up. Note that flipping [`stereo`](Self::stereo) or
/// [`cross_eye`](Self::cross_eye) changes the eye pipeline layout, which the
/// orchestrator rebuilds automatically at the start of the next frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GfxOptions {
    pub fov_y: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    pub monitor_height: f32,
    pub monitor_eye_distance: f32,
    pub eye_separation: f32,
    pub min_perceived_depth: f32,
    pub max_perceived_depth: f32,
    pub anaglyph_left_mask: [f32; 3],
    pub anaglyph_right_mask: [f32; 3],
    pub anaglyph_desaturation: f32,

    pub stereo: bool,
    pub cross_eye: bool,
    pub anaglyph: bool,
    pub post_processing: bool,
    pub render_particles: bool,
    pub point_lights: bool,
    pub render_sky: bool,
    pub shadow_cast: bool,
}

impl Default for GfxOptions {
    fn default() -> Self {
        Self {
            fov_y: 55.0,
            near_clip: 0.3,
            far_clip: 800.0,
            monitor_height: 0.27,
            monitor_eye_distance: 0.6,
            eye_separation: 0.06,
            min_perceived_depth: 0.3,
            max_perceived_depth: 2.0,
            // red/cyan glasses
            anaglyph_left_mask: [1.0, 0.0, 0.0],
            anaglyph_right_mask: [0.0, 1.0, 1.0],
            anaglyph_desaturation: 0.5,

            stereo: false,
            cross_eye: false,
            anaglyph: true,
            post_processing: true,
            render_particles: true,
            point_lights: true,
            render_sky: true,
            shadow_cast: true,
        }
    }
}

impl OptionSource for GfxOptions {
    fn scalar(&self, option: ScalarOption) -> f32 {
        match option {
            ScalarOption::FovY => self.fov_y,
            ScalarOption::NearClip => self.near_clip,
            ScalarOption::FarClip => self.far_clip,
            ScalarOption::MonitorHeight => self.monitor_height,
            ScalarOption::MonitorEyeDistance => self.monitor_eye_distance,
            ScalarOption::EyeSeparation => self.eye_separation,
            ScalarOption::MinPerceivedDepth => self.min_perceived_depth,
            ScalarOption::MaxPerceivedDepth => self.max_perceived_depth,
            ScalarOption::AnaglyphLeftRedMask => self.anaglyph_left_mask[0],
            ScalarOption::AnaglyphLeftGreenMask => self.anaglyph_left_mask[1],
            ScalarOption::AnaglyphLeftBlueMask => self.anaglyph_left_mask[2],
            ScalarOption::AnaglyphRightRedMask => self.anaglyph_right_mask[0],
            ScalarOption::AnaglyphRightGreenMask => self.anaglyph_right_mask[1],
            ScalarOption::AnaglyphRightBlueMask => self.anaglyph_right_mask[2],
            ScalarOption::AnaglyphDesaturation => self.anaglyph_desaturation,
        }
    }

    fn flag(&self, option: FlagOption) -> bool {
        match option {
            FlagOption::Stereo => self.stereo,
            FlagOption::CrossEye => self.cross_eye,
            FlagOption::Anaglyph => self.anaglyph,
            FlagOption::PostProcessing => self.post_processing,
            FlagOption::RenderParticles => self.render_particles,
            FlagOption::PointLights => self.point_lights,
            FlagOption::RenderSky => self.render_sky,
            FlagOption::ShadowCast => self.shadow_cast,
        }
    }
}
