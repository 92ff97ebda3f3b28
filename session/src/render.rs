//! FILENAME: session/src/render.rs
//! Render target seam.

use grid_engine::GridView;

/// The collaborator that paints a row plan.
///
/// A target must paint the plan completely or reject the whole pass;
/// partially painted grids are never acceptable, so a failure here
/// aborts the render with a diagnostic.
pub trait RenderTarget {
    fn paint(&mut self, view: &GridView) -> Result<(), String>;
}

/// Test/headless target that records the last painted plan.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    last: Option<GridView>,
    pub paints: usize,
}

impl RecordingTarget {
    pub fn new() -> Self {
        RecordingTarget::default()
    }

    pub fn last(&self) -> Option<&GridView> {
        self.last.as_ref()
    }
}

impl RenderTarget for RecordingTarget {
    fn paint(&mut self, view: &GridView) -> Result<(), String> {
        self.last = Some(view.clone());
        self.paints += 1;
        Ok(())
    }
}
