//! Eye Render Target Lifecycle
//!
//! One viewport+pipeline pair per active eye: one for mono, two for stereo.
//! [`RenderTargetSet`] exclusively owns the pipeline handles; whenever the
//! display configuration changes it tears everything down and rebuilds, so
//! the orchestrator must re-read the handles each frame and never hold them
//! across a [`reconfigure`](RenderTargetSet::reconfigure).

use crate::backend::{PipelineId, RenderBackend, RenderTargetRef, ViewportRect};
use crate::errors::Result;

/// Pipeline handles for the current frame's eyes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyePipelines {
    pub left: PipelineId,
    pub right: Option<PipelineId>,
}

/// Owner of the per-eye viewports and pipelines on the output window.
#[derive(Debug, Default)]
pub struct RenderTargetSet {
    eyes: Option<EyePipelines>,
}

impl RenderTargetSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current eye pipelines, if configured.
    #[must_use]
    pub fn eyes(&self) -> Option<EyePipelines> {
        self.eyes
    }

    /// Whether the set currently holds two eyes.
    #[must_use]
    pub fn is_stereo(&self) -> bool {
        self.eyes.is_some_and(|e| e.right.is_some())
    }

    /// Tears down any existing eye pipelines and builds the set for the
    /// given display mode. Safe to call at any time, including on resize
    /// with unchanged settings.
    ///
    /// Layout: mono uses one full-window viewport; stereo cross-eye splits
    /// the window into left/right halves; stereo anaglyph overlaps two
    /// full-window viewports stacked by z-order, left underneath.
    pub fn reconfigure<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        stereo: bool,
        cross_eye: bool,
    ) -> Result<()> {
        self.teardown(backend);

        let eyes = if stereo {
            let (left_rect, right_rect) = if cross_eye {
                (
                    ViewportRect::new(0.0, 0.0, 0.5, 1.0),
                    ViewportRect::new(0.5, 0.0, 0.5, 1.0),
                )
            } else {
                (ViewportRect::FULL, ViewportRect::FULL)
            };
            let left = backend.create_pipeline("EyeLeft", RenderTargetRef::Window, left_rect, 0)?;
            let right =
                match backend.create_pipeline("EyeRight", RenderTargetRef::Window, right_rect, 1) {
                    Ok(right) => right,
                    Err(e) => {
                        backend.destroy_pipeline(left);
                        return Err(e);
                    }
                };
            EyePipelines {
                left,
                right: Some(right),
            }
        } else {
            let left =
                backend.create_pipeline("EyeLeft", RenderTargetRef::Window, ViewportRect::FULL, 0)?;
            EyePipelines { left, right: None }
        };

        self.eyes = Some(eyes);
        Ok(())
    }

    /// Destroys the eye pipelines, leaving the set empty. Idempotent.
    pub fn teardown<B: RenderBackend>(&mut self, backend: &mut B) {
        if let Some(eyes) = self.eyes.take() {
            backend.destroy_pipeline(eyes.left);
            if let Some(right) = eyes.right {
                backend.destroy_pipeline(right);
            }
        }
    }
}
