use crate::dashboard::{Chart, DashboardView};
use crate::error::Result;
use crate::models::DateRange;
use crate::writers::ChartRenderer;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ViewHeader<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    requested: &'a DateRange,
    resolved: Option<(NaiveDate, NaiveDate)>,
    row_count: usize,
}

/// Writes one JSON object per line: a view header, then one per chart
pub struct JsonChartWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonChartWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> ChartRenderer for JsonChartWriter<W> {
    fn begin(&mut self, view: &DashboardView) -> Result<()> {
        self.write_line(&ViewHeader {
            kind: "view",
            requested: &view.requested,
            resolved: view.resolved,
            row_count: view.row_count,
        })
    }

    fn render(&mut self, chart: &Chart) -> Result<()> {
        self.write_line(chart)
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
    use crate::models::{Observation, ObservationTable};
    use serde_json::Value;

    #[test]
    fn test_json_lines_output() {
        let table = ObservationTable::new(vec![Observation::builder()
            .day(NaiveDate::from_ymd_opt(2013, 3, 2).unwrap())
            .station("Tiantan")
            .pollutants(12.0, 3.0)
            .build()
            .unwrap()]);
        let view = Dashboard::new(table).refresh(DateRange::default());

        let mut writer = JsonChartWriter::new(Vec::new());
        view.render(&mut writer).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 1 + Question::ALL.len());
        assert_eq!(lines[0]["type"], "view");
        assert_eq!(lines[0]["row_count"], 1);
        assert_eq!(lines[0]["resolved"][0], "2013-03-02");

        let first = &lines[1];
        assert_eq!(first["question"], "pollutants_by_station");
        assert_eq!(first["spec"]["kind"], "grouped_bar");
        assert_eq!(first["data"]["type"], "categorical");
        assert_eq!(first["data"]["categories"][0], "Tiantan");
        assert_eq!(first["data"]["series"][0]["values"][0], 12.0);

        // no wind values recorded: mean is null
        assert!(lines[2]["data"]["series"][0]["values"][0].is_null());
    }
}
