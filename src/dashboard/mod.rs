pub mod chart;

pub use chart::{Chart, ChartData, ChartKind, ChartSpec, Question, Series};

use crate::error::Result;
use crate::models::{DashboardAggregates, DateRange, ObservationTable};
use crate::processors::{AggregationPipeline, RangeFilter};
use crate::writers::ChartRenderer;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Holds the loaded dataset for the lifetime of a session
pub struct Dashboard {
    table: ObservationTable,
    pipeline: AggregationPipeline,
}

impl Dashboard {
    pub fn new(table: ObservationTable) -> Self {
        Self {
            table,
            pipeline: AggregationPipeline::new(),
        }
    }

    pub fn table(&self) -> &ObservationTable {
        &self.table
    }

    /// Filter and aggregate from scratch for one date selection
    pub fn refresh(&self, range: DateRange) -> DashboardView {
        let rows = RangeFilter::new(range).apply(&self.table);
        let aggregates = self.pipeline.run(rows);

        info!(range = %range, rows = rows.len(), "dashboard refreshed");

        DashboardView {
            requested: range,
            resolved: range.resolve(&self.table),
            row_count: rows.len(),
            aggregates,
        }
    }
}

/// Result of one recomputation, discarded after rendering
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub requested: DateRange,
    pub resolved: Option<(NaiveDate, NaiveDate)>,
    pub row_count: usize,
    pub aggregates: DashboardAggregates,
}

impl DashboardView {
    pub fn charts(&self) -> Vec<Chart> {
        Question::ALL
            .into_iter()
            .map(|q| Chart::build(q, &self.aggregates))
            .collect()
    }

    pub fn render(&self, renderer: &mut dyn ChartRenderer) -> Result<()> {
        renderer.begin(self)?;
        for chart in self.charts() {
            renderer.render(&chart)?;
        }
        renderer.finish()
    }
}
