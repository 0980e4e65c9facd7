pub mod json_writer;
pub mod text_writer;

pub use json_writer::JsonChartWriter;
pub use text_writer::TextChartWriter;

use crate::dashboard::{Chart, DashboardView};
use crate::error::Result;
use crate::utils::constants::{DEFAULT_BAR_WIDTH, DEFAULT_PRECISION};

/// Presentation surface: receives reduced chart data, never raw rows
pub trait ChartRenderer {
    /// Called once per recomputation before any chart
    fn begin(&mut self, view: &DashboardView) -> Result<()>;

    fn render(&mut self, chart: &Chart) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub bar_width: usize,
    pub precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            precision: DEFAULT_PRECISION,
        }
    }
}
