//! Stereo Geometry Solver
//!
//! Pure math for stereoscopic camera placement, kept free of any backend
//! state for reuse and testability.
//!
//! The solver produces an asymmetric-frustum shift rather than toeing the
//! cameras in: both eyes keep the same orientation, and convergence comes
//! from sliding each eye's frustum horizontally. The physical camera
//! separation is deliberately decoupled from the viewer's interocular
//! distance so that the configured perceived-depth range, not the raw eye
//! separation, controls the strength of the 3D effect.

use glam::{Quat, Vec3};

use crate::options::{OptionSource, ScalarOption};

// ============================================================================
// Frustum / Eye Offsets
// ============================================================================

/// Inputs to the stereo solve, one value per display-geometry option.
///
/// No validation is applied: `min_depth == max_depth` or
/// `monitor_height == 0` divide by zero. Configuration sanity is the
/// option store's concern, not the solver's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoSetup {
    /// Vertical field of view, in degrees.
    pub fov_y: f32,
    pub monitor_height: f32,
    pub monitor_eye_distance: f32,
    pub eye_separation: f32,
    pub min_depth: f32,
    pub max_depth: f32,
    pub near_clip: f32,
}

impl StereoSetup {
    /// Reads the current display geometry from the option store.
    pub fn from_options<O: OptionSource>(options: &O) -> Self {
        Self {
            fov_y: options.scalar(ScalarOption::FovY),
            monitor_height: options.scalar(ScalarOption::MonitorHeight),
            monitor_eye_distance: options.scalar(ScalarOption::MonitorEyeDistance),
            eye_separation: options.scalar(ScalarOption::EyeSeparation),
            min_depth: options.scalar(ScalarOption::MinPerceivedDepth),
            max_depth: options.scalar(ScalarOption::MaxPerceivedDepth),
            near_clip: options.scalar(ScalarOption::NearClip),
        }
    }
}

/// Solved per-eye placement.
///
/// `frustum_offset` is the half-shift applied with opposite signs to the two
/// eyes (`+` left, `-` right); `eye_shift` is the half camera separation
/// applied along the camera-local X axis (`-X` left, `+X` right).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoRig {
    pub frustum_offset: f32,
    pub eye_shift: f32,
}

/// Solves frustum asymmetry and camera separation for the given display
/// geometry.
///
/// `s` converges the eyes at the far perceived-depth bound; the raw
/// convergence at the near bound is folded with the near clip distance into
/// the physical camera separation `c`.
#[must_use]
pub fn solve_rig(setup: &StereoSetup) -> StereoRig {
    let screen_scale = 2.0 * (setup.fov_y.to_radians() / 2.0).tan() / setup.monitor_height;

    let s = screen_scale
        * setup.eye_separation
        * (1.0 - setup.monitor_eye_distance / setup.max_depth);
    let c_raw = screen_scale
        * setup.eye_separation
        * (1.0 - setup.monitor_eye_distance / setup.min_depth);
    let c = setup.near_clip * (s - c_raw);

    StereoRig {
        frustum_offset: s / 2.0,
        eye_shift: c / 2.0,
    }
}

impl StereoRig {
    /// World-space position of the left eye for a camera at `position` with
    /// the given orientation.
    #[must_use]
    pub fn left_eye_position(&self, position: Vec3, orientation: Quat) -> Vec3 {
        position + self.eye_shift * (orientation * Vec3::NEG_X)
    }

    /// World-space position of the right eye.
    #[must_use]
    pub fn right_eye_position(&self, position: Vec3, orientation: Quat) -> Vec3 {
        position + self.eye_shift * (orientation * Vec3::X)
    }
}

// ============================================================================
// Anaglyph Color Separation
// ============================================================================

/// Per-eye RGB masks plus the shared saturation mask for anaglyph
/// compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnaglyphMasks {
    pub left: Vec3,
    pub right: Vec3,
    /// `1 - desaturation`: how much of the original color survives in each
    /// eye before the channel masks apply.
    pub saturation_mask: f32,
}

/// Reads the anaglyph channel masks from the option store.
///
/// For glasses-compatible output the two masks should partition the
/// spectrum (left + right summing to `(1,1,1)`, e.g. red/cyan); nothing
/// enforces this, exotic filter sets are representable.
pub fn anaglyph_masks<O: OptionSource>(options: &O) -> AnaglyphMasks {
    AnaglyphMasks {
        left: Vec3::new(
            options.scalar(ScalarOption::AnaglyphLeftRedMask),
            options.scalar(ScalarOption::AnaglyphLeftGreenMask),
            options.scalar(ScalarOption::AnaglyphLeftBlueMask),
        ),
        right: Vec3::new(
            options.scalar(ScalarOption::AnaglyphRightRedMask),
            options.scalar(ScalarOption::AnaglyphRightGreenMask),
            options.scalar(ScalarOption::AnaglyphRightBlueMask),
        ),
        saturation_mask: 1.0 - options.scalar(ScalarOption::AnaglyphDesaturation),
    }
}

