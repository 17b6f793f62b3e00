//! Environment Cube Baking
//!
//! Offline capture of the scene into a 6-face HDR environment strip:
//! six 90° renders into one `6·size × size` float target, a per-pixel
//! grading pass (ambient add, saturation blend, exposure scale, gamma
//! encode), and a 16-bit fixed-point write to disk.
//!
//! Synchronous and blocking for its whole duration; meant for tool/editor
//! commands, not gameplay frames. The output file is written only after all
//! six faces and the full grading pass succeed; a mid-bake failure leaves
//! no partial file behind.

use std::f32::consts::{FRAC_PI_2, PI};
use std::path::Path;

use glam::{Quat, Vec3};

use crate::backend::{RenderBackend, RenderTargetRef, TargetId, ViewportRect};
use crate::camera::CameraDescriptor;
use crate::env_cube::CUBE_FACES;
use crate::errors::{GfxError, Result};

const BAKE_NEAR_CLIP: f32 = 0.3;
const BAKE_FAR_CLIP: f32 = 1200.0;

/// Fixed scale dividing captured radiance into displayable range before the
/// gamma encode; decoding multiplies it back.
const HDR_HEADROOM: f32 = 16.0;

const GAMMA: f32 = 2.2;

/// Capture orientations for faces `+X −X +Y −Y +Z −Z`, chosen so the strip
/// reads correctly once the grading pass mirrors it vertically.
fn face_orientations() -> [Quat; CUBE_FACES] {
    let pitch_up = Quat::from_rotation_x(FRAC_PI_2);
    [
        Quat::from_rotation_y(FRAC_PI_2) * pitch_up,  // +X
        Quat::from_rotation_y(-FRAC_PI_2) * pitch_up, // -X
        Quat::IDENTITY,                               // +Y
        Quat::from_rotation_x(PI),                    // -Y
        pitch_up,                                     // +Z
        pitch_up * Quat::from_rotation_z(PI),         // -Z
    ]
}

/// Bakes the scene around `camera_position` into a `6·size × size` cube
/// strip at `output_path`.
///
/// `size` must be a power of two. `saturation` mixes toward grayscale
/// (1 = original colors, 0 = luminance only); `ambient` is added to the
/// captured radiance before grading.
pub fn bake_env_cube<B: RenderBackend>(
    backend: &mut B,
    output_path: &Path,
    size: u32,
    camera_position: Vec3,
    saturation: f32,
    ambient: Vec3,
) -> Result<()> {
    if size == 0 || !size.is_power_of_two() {
        return Err(GfxError::Configuration(format!(
            "can only bake environment cubes with a power of 2 size, got {size}"
        )));
    }

    let target = backend.create_hdr_target(6 * size, size)?;
    let radiance = capture_faces(backend, target, camera_position)
        .and_then(|()| backend.read_hdr_target(target));
    backend.destroy_target(target);
    let radiance = radiance?;

    let strip = grade(&radiance, size, saturation, ambient);
    strip.save(output_path)?;
    Ok(())
}

/// Renders the six faces into equal-width slices of the strip target.
fn capture_faces<B: RenderBackend>(
    backend: &mut B,
    target: TargetId,
    camera_position: Vec3,
) -> Result<()> {
    for (face, orientation) in face_orientations().into_iter().enumerate() {
        let viewport = ViewportRect::new(face as f32 / 6.0, 0.0, 1.0 / 6.0, 1.0);
        let pipeline = backend.create_pipeline(
            "EnvCubeBake",
            RenderTargetRef::Offscreen(target),
            viewport,
            0,
        )?;

        // Raw sky + surface radiance: no post-processing, no effects, and no
        // direct sun (the bake result is itself a light source).
        let camera = CameraDescriptor {
            fov_y: 90.0,
            near_clip: BAKE_NEAR_CLIP,
            far_clip: BAKE_FAR_CLIP,
            position: camera_position,
            orientation,
            bloom_and_tone_map: false,
            particles: false,
            point_lights: false,
            sky: true,
            hud: false,
            sun: false,
            ..CameraDescriptor::default()
        };

        let outcome = backend.render(pipeline, &camera, false);
        backend.destroy_pipeline(pipeline);
        outcome?;
    }
    Ok(())
}

/// Grades the linear capture into the gamma-encoded 16-bit output strip.
///
/// Per pixel, in order: add ambient, blend toward mean luminance by
/// `saturation`, divide by the HDR headroom, gamma-encode each channel, and
/// store into the vertically mirrored row so the final image reads
/// top-to-bottom.
fn grade(
    radiance: &[f32],
    size: u32,
    saturation: f32,
    ambient: Vec3,
) -> image::ImageBuffer<image::Rgb<u16>, Vec<u16>> {
    let width = 6 * size;
    assert_eq!(
        radiance.len(),
        (width * size * 3) as usize,
        "HDR readback size does not match the bake target"
    );

    let mut strip = image::ImageBuffer::new(width, size);
    for y in 0..size {
        for x in 0..width {
            let i = ((y * width + x) * 3) as usize;
            let mut color = Vec3::new(radiance[i], radiance[i + 1], radiance[i + 2]) + ambient;
            let grey = (color.x + color.y + color.z) / 3.0;
            color = saturation * color + (1.0 - saturation) * Vec3::splat(grey);
            color /= HDR_HEADROOM;

            let encode = |v: f32| {
                let v = v.max(0.0).powf(1.0 / GAMMA).min(1.0);
                (v * f32::from(u16::MAX)).round() as u16
            };
            strip.put_pixel(
                x,
                size - y - 1,
                image::Rgb([encode(color.x), encode(color.y), encode(color.z)]),
            );
        }
    }
    strip
}
