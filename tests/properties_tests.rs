//! Scene Property Registry Tests
//!
//! Tests for:
//! - The composite fog push: every fog/tone setter re-pushes all five
//!   scalars plus the color, exactly once per set
//! - Sun and ambient setters pushing straight through to the backend
//! - Environment cube strip validation and face reorganization
//! - The built-in flat debug cube sentinel
//! - Material kind registry lookups

mod common;

use glam::Vec3;

use common::{MockBackend, MockSurface};
use ember_gfx::context::GfxContext;
use ember_gfx::env_cube::{CubeImage, EnvironmentCubeState, FLAT_CUBE_PATH};
use ember_gfx::errors::{ErrorKind, GfxError};
use ember_gfx::materials::MaterialKind;
use ember_gfx::options::GfxOptions;
use ember_gfx::properties::SceneProperties;

fn new_context() -> GfxContext<MockBackend, MockSurface, GfxOptions> {
    GfxContext::init(MockBackend::new(), MockSurface::new(), GfxOptions::default())
        .expect("context init should succeed")
}

// ============================================================================
// Composite Fog Push
// ============================================================================

#[test]
fn each_fog_group_setter_pushes_the_complete_state_once() {
    let mut backend = MockBackend::new();
    let mut props = SceneProperties::default();

    props.set_fog_color(&mut backend, Vec3::new(0.5, 0.6, 0.7));
    props.set_fog_density(&mut backend, 0.02);
    props.set_env_brightness(&mut backend, 1.5);
    props.set_exposure(&mut backend, 2.0);
    props.set_contrast(&mut backend, 0.1);
    props.set_saturation(&mut backend, 0.8);

    assert_eq!(
        backend.fog_pushes.len(),
        6,
        "each setter triggers exactly one composite push"
    );

    // The final push carries every current value, not just the changed one.
    let (color, params) = backend.fog_pushes.last().copied().expect("pushes recorded");
    assert_eq!(color, Vec3::new(0.5, 0.6, 0.7));
    assert!((params.density - 0.02).abs() < 1e-6);
    assert!((params.env_brightness - 1.5).abs() < 1e-6);
    assert!((params.exposure - 2.0).abs() < 1e-6);
    assert!((params.contrast - 0.1).abs() < 1e-6);
    assert!((params.saturation - 0.8).abs() < 1e-6);

    // And intermediate pushes already carried earlier values forward.
    let (_, after_density) = backend.fog_pushes[1];
    assert!((after_density.density - 0.02).abs() < 1e-6);
    assert!(
        (after_density.env_brightness - 1.0).abs() < 1e-6,
        "unset values keep their defaults in the composite push"
    );
}

#[test]
fn sun_and_ambient_setters_push_through() {
    let mut backend = MockBackend::new();
    let mut props = SceneProperties::default();

    props.set_sun_diffuse(&mut backend, Vec3::new(1.0, 0.9, 0.8));
    props.set_sun_specular(&mut backend, Vec3::new(0.3, 0.3, 0.3));
    props.set_sun_direction(&mut backend, Vec3::new(0.0, -1.0, 0.0));
    props.set_ambient_light(&mut backend, Vec3::splat(0.2));

    assert_eq!(backend.sun_diffuse_pushes, vec![Vec3::new(1.0, 0.9, 0.8)]);
    assert_eq!(backend.sun_specular_pushes, vec![Vec3::new(0.3, 0.3, 0.3)]);
    assert_eq!(backend.sun_direction_pushes, vec![Vec3::new(0.0, -1.0, 0.0)]);
    assert_eq!(backend.ambient_pushes, vec![Vec3::splat(0.2)]);
    assert!(
        backend.fog_pushes.is_empty(),
        "sun/ambient setters do not touch the fog call"
    );

    assert_eq!(props.sun_diffuse(), Vec3::new(1.0, 0.9, 0.8));
    assert_eq!(props.ambient_light(), Vec3::splat(0.2));
}

#[test]
fn context_setters_forward_to_the_registry() {
    let mut ctx = new_context();
    let pushes_at_init = ctx.backend().fog_pushes.len();

    ctx.set_fog_density(0.05);
    ctx.set_exposure(1.4);

    assert_eq!(ctx.backend().fog_pushes.len(), pushes_at_init + 2);
    assert!((ctx.fog_density() - 0.05).abs() < 1e-6);
    assert!((ctx.exposure() - 1.4).abs() < 1e-6);
}

// ============================================================================
// Environment Cube
// ============================================================================

#[test]
fn strip_with_wrong_aspect_is_rejected() {
    let strip = image::RgbImage::new(10, 2); // needs 12x2
    let err = CubeImage::from_strip(&strip).expect_err("wrong aspect must fail");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, GfxError::CubeMap(_)));
}

#[test]
fn strip_with_non_power_of_two_height_is_rejected() {
    let strip = image::RgbImage::new(36, 6);
    let err = CubeImage::from_strip(&strip).expect_err("height 6 must fail");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn strip_faces_are_reorganized_face_major() {
    // 6 faces of 2x2, each filled with a distinct red level.
    let mut strip = image::RgbImage::new(12, 2);
    for face in 0u8..6 {
        for y in 0..2 {
            for x in 0..2 {
                strip.put_pixel(
                    u32::from(face) * 2 + x,
                    y,
                    image::Rgb([face * 40, 0, 0]),
                );
            }
        }
    }

    let cube = CubeImage::from_strip(&strip).expect("valid strip should convert");
    assert_eq!(cube.size(), 2);
    for face in 0..6 {
        let pixels = cube.face(face);
        assert_eq!(pixels.len(), 2 * 2 * 3);
        assert!(
            pixels.chunks(3).all(|px| px[0] == face as u8 * 40),
            "face {face} pixels should all come from strip slice {face}"
        );
    }
}

#[test]
fn flat_sentinel_synthesizes_without_disk() {
    let mut backend = MockBackend::new();
    let mut state = EnvironmentCubeState::new();

    state
        .set(&mut backend, std::path::Path::new("/nonexistent"), FLAT_CUBE_PATH)
        .expect("the sentinel never touches disk");

    assert_eq!(backend.cube_uploads.len(), 1);
    let cube = &backend.cube_uploads[0];
    assert_eq!(cube.size(), 1);
    assert_eq!(cube.face(0), &[0xff, 0x7f, 0x7f], "+X face tint");
    assert_eq!(cube.face(5), &[0x7f, 0x7f, 0x00], "-Z face tint");
    assert_eq!(state.path(), FLAT_CUBE_PATH);
}

#[test]
fn setting_the_same_path_twice_uploads_once() {
    let mut backend = MockBackend::new();
    let mut state = EnvironmentCubeState::new();
    let root = std::path::Path::new(".");

    state.set(&mut backend, root, FLAT_CUBE_PATH).expect("first set");
    state.set(&mut backend, root, FLAT_CUBE_PATH).expect("second set");

    assert_eq!(backend.cube_uploads.len(), 1, "same path is a no-op");
}

#[test]
fn relative_paths_are_rejected() {
    let mut backend = MockBackend::new();
    let mut state = EnvironmentCubeState::new();

    let err = state
        .set(&mut backend, std::path::Path::new("."), "maps/env.png")
        .expect_err("paths must start with '/'");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(backend.cube_uploads.is_empty());
}

#[test]
fn disk_strip_loads_through_the_context() {
    let dir = std::env::temp_dir().join(format!("ember_gfx_env_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let mut strip = image::RgbImage::new(24, 4);
    for (_, _, px) in strip.enumerate_pixels_mut() {
        *px = image::Rgb([10, 20, 30]);
    }
    strip.save(dir.join("env.png")).expect("write strip");

    let mut ctx = new_context();
    ctx.set_resource_root(&dir);
    ctx.set_env_cube("/env.png").expect("strip should load");

    assert_eq!(ctx.env_cube(), "/env.png");
    let uploads = &ctx.backend().cube_uploads;
    let cube = uploads.last().expect("the strip should have been uploaded");
    assert_eq!(cube.size(), 4);
    assert_eq!(&cube.face(3)[0..3], &[10, 20, 30]);

    std::fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// Material Kinds
// ============================================================================

#[test]
fn material_kinds_resolve_from_the_stored_tag() {
    let mut ctx = new_context();
    ctx.materials_mut().register("concrete", MaterialKind::Standard);
    ctx.materials_mut().register("noon_sky", MaterialKind::Sky);

    assert_eq!(
        ctx.materials().kind("concrete").expect("registered"),
        MaterialKind::Standard
    );
    assert_eq!(
        ctx.materials().kind("noon_sky").expect("registered"),
        MaterialKind::Sky
    );
    assert!(ctx.materials().contains("concrete"));
    assert!(!ctx.materials().contains("marble"));

    let err = ctx.materials().kind("marble").expect_err("unknown material");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
