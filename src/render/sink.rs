//! Frame persistence. The external assembly step (ffmpeg over an image
//! sequence) relies on the file-name enumeration encoding frame order.

use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::{
    core::{Canvas, FrameIndex},
    error::{ChartError, ChartResult},
};

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing
/// [`FrameIndex`] order, starting at 0, with no gaps.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, canvas: Canvas) -> ChartResult<()>;
    /// Push one finished frame document.
    fn push_frame(&mut self, index: FrameIndex, svg: &str) -> ChartResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ChartResult<()>;
}

/// Writes `frame_NNNNN.svg` files into a directory, enforcing the ordering
/// contract so a dropped or reordered frame surfaces as an error instead of
/// a scrambled video.
#[derive(Debug)]
pub struct SvgDirectorySink {
    dir: PathBuf,
    next: u64,
}

impl SvgDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next: 0,
        }
    }

    /// Number of frames written so far.
    pub fn written(&self) -> u64 {
        self.next
    }
}

impl FrameSink for SvgDirectorySink {
    fn begin(&mut self, _canvas: Canvas) -> ChartResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output directory '{}'", self.dir.display()))?;
        self.next = 0;
        Ok(())
    }

    fn push_frame(&mut self, index: FrameIndex, svg: &str) -> ChartResult<()> {
        if index.0 != self.next {
            return Err(ChartError::render(format!(
                "frames must be pushed in order: expected {}, got {}",
                self.next, index.0
            )));
        }
        let path = self.dir.join(format!("frame_{:05}.svg", index.0));
        std::fs::write(&path, svg)
            .with_context(|| format!("write frame '{}'", path.display()))?;
        self.next += 1;
        Ok(())
    }

    fn end(&mut self) -> ChartResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    canvas: Option<Canvas>,
    frames: Vec<(FrameIndex, String)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, String)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, canvas: Canvas) -> ChartResult<()> {
        self.canvas = Some(canvas);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, index: FrameIndex, svg: &str) -> ChartResult<()> {
        self.frames.push((index, svg.to_string()));
        Ok(())
    }

    fn end(&mut self) -> ChartResult<()> {
        Ok(())
    }
}
