//! Scene Property Registry
//!
//! Global visual parameters (sun, ambient light, fog, tone grading) settable
//! independently at any time between frames. Sun and ambient setters push
//! straight through to the backend. Fog density and the four tone parameters
//! share a single composite fog call, so changing any one of them re-pushes
//! all five in their fixed slot order; the backend never observes a stale
//! combination.

use glam::Vec3;

use crate::backend::{FogParams, RenderBackend};

/// Process-wide visual state, owned by the graphics context.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneProperties {
    sun_diffuse: Vec3,
    sun_specular: Vec3,
    sun_direction: Vec3,
    ambient_light: Vec3,
    fog_color: Vec3,
    fog_density: f32,
    env_brightness: f32,
    exposure: f32,
    contrast: f32,
    saturation: f32,
}

impl Default for SceneProperties {
    fn default() -> Self {
        Self {
            sun_diffuse: Vec3::ONE,
            sun_specular: Vec3::ONE,
            sun_direction: Vec3::NEG_Y,
            ambient_light: Vec3::ZERO,
            fog_color: Vec3::ZERO,
            fog_density: 0.0,
            env_brightness: 1.0,
            exposure: 1.0,
            contrast: 0.0,
            saturation: 1.0,
        }
    }
}

impl SceneProperties {
    #[must_use]
    pub fn sun_diffuse(&self) -> Vec3 {
        self.sun_diffuse
    }

    #[must_use]
    pub fn sun_specular(&self) -> Vec3 {
        self.sun_specular
    }

    #[must_use]
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_direction
    }

    #[must_use]
    pub fn ambient_light(&self) -> Vec3 {
        self.ambient_light
    }

    #[must_use]
    pub fn fog_color(&self) -> Vec3 {
        self.fog_color
    }

    #[must_use]
    pub fn fog_density(&self) -> f32 {
        self.fog_density
    }

    #[must_use]
    pub fn env_brightness(&self) -> f32 {
        self.env_brightness
    }

    #[must_use]
    pub fn exposure(&self) -> f32 {
        self.exposure
    }

    #[must_use]
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    #[must_use]
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn set_sun_diffuse<B: RenderBackend>(&mut self, backend: &mut B, color: Vec3) {
        self.sun_diffuse = color;
        backend.set_sun_diffuse(color);
    }

    pub fn set_sun_specular<B: RenderBackend>(&mut self, backend: &mut B, color: Vec3) {
        self.sun_specular = color;
        backend.set_sun_specular(color);
    }

    /// `direction` must be a unit vector.
    pub fn set_sun_direction<B: RenderBackend>(&mut self, backend: &mut B, direction: Vec3) {
        self.sun_direction = direction;
        backend.set_sun_direction(direction);
    }

    pub fn set_ambient_light<B: RenderBackend>(&mut self, backend: &mut B, color: Vec3) {
        self.ambient_light = color;
        backend.set_ambient_light(color);
    }

    pub fn set_fog_color<B: RenderBackend>(&mut self, backend: &mut B, color: Vec3) {
        self.fog_color = color;
        self.push_fog(backend);
    }

    /// `density` must be non-negative.
    pub fn set_fog_density<B: RenderBackend>(&mut self, backend: &mut B, density: f32) {
        self.fog_density = density;
        self.push_fog(backend);
    }

    pub fn set_env_brightness<B: RenderBackend>(&mut self, backend: &mut B, brightness: f32) {
        self.env_brightness = brightness;
        self.push_fog(backend);
    }

    pub fn set_exposure<B: RenderBackend>(&mut self, backend: &mut B, exposure: f32) {
        self.exposure = exposure;
        self.push_fog(backend);
    }

    pub fn set_contrast<B: RenderBackend>(&mut self, backend: &mut B, contrast: f32) {
        self.contrast = contrast;
        self.push_fog(backend);
    }

    pub fn set_saturation<B: RenderBackend>(&mut self, backend: &mut B, saturation: f32) {
        self.saturation = saturation;
        self.push_fog(backend);
    }

    /// Re-pushes the composite fog/tone state.
    pub fn push_fog<B: RenderBackend>(&self, backend: &mut B) {
        backend.set_fog(
            self.fog_color,
            FogParams {
                density: self.fog_density,
                env_brightness: self.env_brightness,
                exposure: self.exposure,
                contrast: self.contrast,
                saturation: self.saturation,
            },
        );
    }
}
