// Surfaces that figures can be drawn on

use crate::error::Result;
use crate::figure::Figure;

mod window;
pub use window::WindowSink;

mod png;
pub use png::PngSink;

// Receives every figure produced by a run.
// `finish` is called once after the last figure; interactive sinks block there.
pub trait RenderSink {
    fn render(&mut self, figure: Figure) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
