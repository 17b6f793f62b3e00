//! Per-Frame Camera Construction
//!
//! [`CameraDescriptor`] is the complete set of parameters one pipeline
//! invocation needs to draw one eye. Descriptors are built fresh every frame
//! from the current option values and the host-supplied camera pose; they
//! carry no identity beyond the frame and are immutable once handed to the
//! backend.

use glam::{Quat, Vec3};

use crate::options::{FlagOption, OptionSource, ScalarOption};
use crate::stereo::{self, StereoSetup};

/// Fully-specified camera for one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDescriptor {
    /// Vertical field of view, in degrees.
    pub fov_y: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    pub position: Vec3,
    pub orientation: Quat,
    /// Horizontal frustum shift for asymmetric-frustum stereo; zero in mono.
    pub frustum_offset: f32,
    /// Per-channel output mask for anaglyph compositing.
    pub color_mask: Vec3,
    /// How much of the original color survives before `color_mask` applies.
    pub saturation_mask: f32,

    pub bloom_and_tone_map: bool,
    pub particles: bool,
    pub point_lights: bool,
    pub sky: bool,
    pub hud: bool,
    pub sun: bool,
}

impl Default for CameraDescriptor {
    fn default() -> Self {
        Self {
            fov_y: 55.0,
            near_clip: 0.3,
            far_clip: 800.0,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            frustum_offset: 0.0,
            color_mask: Vec3::ONE,
            saturation_mask: 1.0,
            bloom_and_tone_map: true,
            particles: true,
            point_lights: true,
            sky: true,
            hud: true,
            sun: true,
        }
    }
}

/// The camera set for one frame: one descriptor in mono, two in stereo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameCameras {
    Mono(CameraDescriptor),
    Stereo {
        left: CameraDescriptor,
        right: CameraDescriptor,
        /// When set, the right-eye invocation composites over the left eye's
        /// output instead of replacing it.
        composite_anaglyph: bool,
    },
}

/// Builds the frame's camera descriptor(s) from the current options and the
/// host camera pose.
///
/// Options are read fresh on every call; nothing here is cached between
/// frames. In stereo mode the left and right descriptors share everything
/// except the frustum offset, the eye position, and (when anaglyph is on)
/// the color masks.
pub fn build_frame_cameras<O: OptionSource>(
    options: &O,
    position: Vec3,
    orientation: Quat,
) -> FrameCameras {
    let base = CameraDescriptor {
        fov_y: options.scalar(ScalarOption::FovY),
        near_clip: options.scalar(ScalarOption::NearClip),
        far_clip: options.scalar(ScalarOption::FarClip),
        position,
        orientation,
        bloom_and_tone_map: options.flag(FlagOption::PostProcessing),
        particles: options.flag(FlagOption::RenderParticles),
        point_lights: options.flag(FlagOption::PointLights),
        sky: options.flag(FlagOption::RenderSky),
        ..CameraDescriptor::default()
    };

    if !options.flag(FlagOption::Stereo) {
        return FrameCameras::Mono(base);
    }

    let rig = stereo::solve_rig(&StereoSetup::from_options(options));

    let mut left = base;
    let mut right = base;
    left.frustum_offset = rig.frustum_offset;
    right.frustum_offset = -rig.frustum_offset;
    left.position = rig.left_eye_position(position, orientation);
    right.position = rig.right_eye_position(position, orientation);

    let composite_anaglyph = options.flag(FlagOption::Anaglyph);
    if composite_anaglyph {
        let masks = stereo::anaglyph_masks(options);
        left.color_mask = masks.left;
        right.color_mask = masks.right;
        left.saturation_mask = masks.saturation_mask;
        right.saturation_mask = masks.saturation_mask;
    }

    FrameCameras::Stereo {
        left,
        right,
        composite_anaglyph,
    }
}
