#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod backend;
pub mod bake;
pub mod camera;
pub mod context;
pub mod env_cube;
pub mod errors;
pub mod materials;
pub mod options;
pub mod properties;
pub mod shadow;
pub mod stats;
pub mod stereo;
pub mod surface;
pub mod targets;

pub use backend::{
    FogParams, PipelineId, RenderBackend, RenderStats, RenderTargetRef, TargetId, ViewportRect,
};
pub use camera::{CameraDescriptor, FrameCameras};
pub use context::{GfxContext, IDLE_FRAME_INTERVAL};
pub use env_cube::{CubeImage, CUBE_FACES, FLAT_CUBE_PATH};
pub use errors::{ErrorKind, GfxError, Result};
pub use materials::{MaterialKind, MaterialKindRegistry};
pub use options::{FlagOption, GfxOptions, OptionSource, ScalarOption};
pub use properties::SceneProperties;
pub use shadow::{LightId, ShadowCaptureSink, ShadowMatrixTracker, SHADOW_CASCADES};
pub use stats::{LastFrameStats, RunningFrameStats};
pub use stereo::{AnaglyphMasks, StereoRig, StereoSetup};
pub use surface::{OutputSurface, SurfaceEvent};
pub use targets::{EyePipelines, RenderTargetSet};
