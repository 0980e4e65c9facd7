use crate::dashboard::{Chart, ChartData, ChartKind, DashboardView, Series};
use crate::error::Result;
use crate::utils::constants::DASHBOARD_TITLE;
use crate::writers::{ChartRenderer, RenderOptions};
use std::io::Write;

const BAR_CHAR: char = '█';
const LINE_MARKER: char = '●';
const NO_DATA: &str = "(no data for the selected date range)";

/// Renders charts as plain terminal text
pub struct TextChartWriter<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> TextChartWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn fmt_value(&self, value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{:.*}", self.options.precision, v),
            None => "n/a".to_string(),
        }
    }

    /// Number of cells a value occupies on a scale topping out at `max`
    fn scaled(&self, value: f64, max: f64, cells: usize) -> usize {
        if max <= 0.0 || value <= 0.0 {
            return 0;
        }
        ((value / max) * cells as f64).round() as usize
    }

    fn write_categorical(
        &mut self,
        kind: ChartKind,
        categories: &[String],
        series: &[Series],
    ) -> Result<()> {
        let max = series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .fold(0.0_f64, |acc, v| acc.max(*v));
        let category_width = categories.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        let series_width = series.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
        let width = self.options.bar_width;

        for (i, category) in categories.iter().enumerate() {
            for (j, s) in series.iter().enumerate() {
                let value = s.values.get(i).copied().flatten();
                let label = if j == 0 { category.as_str() } else { "" };

                let plot = match (kind, value) {
                    (_, None) => String::new(),
                    (ChartKind::Line, Some(v)) => {
                        let pos = self.scaled(v, max, width.saturating_sub(1));
                        format!("{}{}", " ".repeat(pos), LINE_MARKER)
                    }
                    (_, Some(v)) => BAR_CHAR.to_string().repeat(self.scaled(v, max, width)),
                };
                let shown = self.fmt_value(value);

                writeln!(
                    self.out,
                    "  {:<cw$}  {:<sw$}  {:<bw$} {}",
                    label,
                    s.name,
                    plot,
                    shown,
                    cw = category_width,
                    sw = series_width,
                    bw = width,
                )?;
            }
        }

        Ok(())
    }

    fn write_matrix(&mut self, labels: &[String], values: &[Vec<Option<f64>>]) -> Result<()> {
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let cell_width = labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.options.precision + 4);

        let header: String = labels
            .iter()
            .map(|l| format!(" {:>w$}", l, w = cell_width))
            .collect();
        writeln!(self.out, "  {:<w$}{}", "", header, w = label_width)?;

        for (label, row) in labels.iter().zip(values) {
            let cells: String = row
                .iter()
                .map(|v| format!(" {:>w$}", self.fmt_value(*v), w = cell_width))
                .collect();
            writeln!(self.out, "  {:<w$}{}", label, cells, w = label_width)?;
        }

        Ok(())
    }
}

impl<W: Write> ChartRenderer for TextChartWriter<W> {
    fn begin(&mut self, view: &DashboardView) -> Result<()> {
        writeln!(self.out, "{}", DASHBOARD_TITLE)?;
        writeln!(self.out, "{}", "=".repeat(DASHBOARD_TITLE.chars().count()))?;

        match view.resolved {
            Some((start, end)) => writeln!(
                self.out,
                "Date range: {} to {} ({} rows)",
                start, end, view.row_count
            )?,
            None => writeln!(self.out, "Date range: {} (no data)", view.requested)?,
        }

        Ok(())
    }

    fn render(&mut self, chart: &Chart) -> Result<()> {
        let spec = &chart.spec;
        writeln!(self.out)?;
        writeln!(self.out, "{}", spec.title)?;
        writeln!(self.out, "{}", "-".repeat(spec.title.chars().count()))?;

        if !spec.x_label.is_empty() || !spec.y_label.is_empty() {
            writeln!(self.out, "  x: {} | y: {}", spec.x_label, spec.y_label)?;
        }

        if chart.data.is_empty() {
            writeln!(self.out, "  {}", NO_DATA)?;
            return Ok(());
        }

        match &chart.data {
            ChartData::Categorical { categories, series } => {
                self.write_categorical(spec.kind, categories, series)
            }
            ChartData::Matrix { labels, values } => self.write_matrix(labels, values),
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, Question};
    use crate::models::{DateRange, Observation, ObservationTable};
    use chrono::NaiveDate;

    fn render_to_string(chart: &Chart, options: RenderOptions) -> String {
        let mut writer = TextChartWriter::new(Vec::new()).with_options(options);
        writer.render(chart).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    fn bar_chart(values: Vec<Option<f64>>) -> Chart {
        let spec = Question::WindByStation.spec();
        Chart {
            question: Question::WindByStation,
            spec,
            data: ChartData::Categorical {
                categories: (0..values.len()).map(|i| format!("S{}", i)).collect(),
                series: vec![Series::new("WSPM", values)],
            },
        }
    }

    #[test]
    fn test_bars_scale_to_largest_value() {
        let options = RenderOptions {
            bar_width: 10,
            precision: 1,
        };
        let text = render_to_string(&bar_chart(vec![Some(4.0), Some(2.0), None]), options);

        assert!(text.contains("Average Wind Speed (WSPM) per Station"));
        assert!(text.contains(&format!("{} 4.0", "█".repeat(10))));
        assert!(text.contains(&format!("{}      2.0", "█".repeat(5))));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn test_empty_chart_renders_placeholder() {
        let text = render_to_string(&bar_chart(vec![]), RenderOptions::default());
        assert!(text.contains(NO_DATA));
    }

    #[test]
    fn test_heatmap_grid() {
        let chart = Chart {
            question: Question::ParticulateWeatherCorrelation,
            spec: Question::ParticulateWeatherCorrelation.spec(),
            data: ChartData::Matrix {
                labels: vec!["PM2.5".to_string(), "TEMP".to_string()],
                values: vec![vec![Some(1.0), Some(-0.25)], vec![Some(-0.25), None]],
            },
        };
        let text = render_to_string(&chart, RenderOptions::default());

        assert!(text.contains("PM2.5"));
        assert!(text.contains("-0.25"));
        assert!(text.contains("1.00"));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn test_full_view_render() {
        let table = ObservationTable::new(vec![Observation::builder()
            .day(NaiveDate::from_ymd_opt(2013, 3, 1).unwrap())
            .station("Dongsi")
            .pollutants(10.0, 5.0)
            .particulates(20.0, 30.0)
            .weather(1.0, 2.0, 1000.0)
            .temp_bin(Some("(0, 10]".to_string()))
            .build()
            .unwrap()]);
        let view = Dashboard::new(table).refresh(DateRange::default());

        let mut writer = TextChartWriter::new(Vec::new());
        view.render(&mut writer).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        assert!(text.starts_with(DASHBOARD_TITLE));
        assert!(text.contains("Date range: 2013-03-01 to 2013-03-01 (1 rows)"));
        for question in Question::ALL {
            assert!(text.contains(question.spec().title));
        }
        assert!(text.contains("Dongsi"));
    }
}
