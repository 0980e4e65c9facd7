use airq_dashboard::models::{DateRange, Measure, Observation, ObservationTable};
use airq_dashboard::processors::{
    correlation_matrix, AggregationPipeline, RangeFilter, WIND_POLLUTANT_MEASURES,
};
use airq_dashboard::utils::parse_timestamp;
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const STATIONS: [&str; 12] = [
    "Aotizhongxin",
    "Changping",
    "Dingling",
    "Dongsi",
    "Guanyuan",
    "Gucheng",
    "Huairou",
    "Nongzhanguan",
    "Shunyi",
    "Tiantan",
    "Wanliu",
    "Wanshouxigong",
];

// Hourly readings for every station over `days` days
fn create_test_table(days: usize) -> ObservationTable {
    let base = NaiveDate::from_ymd_opt(2013, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut rows = Vec::with_capacity(days * 24 * STATIONS.len());

    for hour in 0..days * 24 {
        let date = base + Duration::hours(hour as i64);
        for (i, station) in STATIONS.iter().enumerate() {
            let temp = -5.0 + (hour % 240) as f64 / 8.0 + i as f64 * 0.2;
            let lower = (temp / 10.0).floor() * 10.0;
            let bin = format!("({}, {}]", lower, lower + 10.0);
            let missing = (hour + i) % 17 == 0;

            rows.push(
                Observation::builder()
                    .date(date)
                    .station(*station)
                    .measure(
                        Measure::O3,
                        (!missing).then_some(40.0 + (hour % 24) as f64 + i as f64),
                    )
                    .measure(Measure::So2, Some(8.0 + (hour % 7) as f64))
                    .particulates(90.0 - temp + i as f64, 120.0 - temp)
                    .weather(1.0 + (hour % 5) as f64 * 0.4, temp, 1015.0 - temp * 0.3)
                    .temp_bin(Some(bin))
                    .build()
                    .unwrap(),
            );
        }
    }

    ObservationTable::new(rows)
}

fn benchmark_range_filter(c: &mut Criterion) {
    let table = create_test_table(365);
    let range = DateRange::between(
        NaiveDate::from_ymd_opt(2013, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2013, 8, 31).unwrap(),
    );

    c.bench_function("range_filter", |b| {
        b.iter(|| {
            let rows = RangeFilter::new(black_box(range)).apply(&table);
            black_box(rows.len())
        })
    });
}

fn benchmark_correlation(c: &mut Criterion) {
    let table = create_test_table(90);

    c.bench_function("wind_pollutant_correlation", |b| {
        b.iter(|| black_box(correlation_matrix(table.rows(), &WIND_POLLUTANT_MEASURES)))
    });
}

fn benchmark_timestamp_parsing(c: &mut Criterion) {
    let values = [
        "2013-03-01 00:00:00",
        "2014-07-15 13:00:00",
        "2016-12-31",
        "2017-02-28T23:00:00",
    ];

    c.bench_function("timestamp_parsing", |b| {
        b.iter(|| {
            let parsed = values
                .iter()
                .filter(|v| parse_timestamp(black_box(v)).is_some())
                .count();
            black_box(parsed)
        })
    });
}

fn benchmark_pipeline_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_by_days");
    let pipeline = AggregationPipeline::new();

    for &days in &[7, 30, 180, 365] {
        let table = create_test_table(days);
        group.bench_with_input(BenchmarkId::new("days", days), &table, |b, table| {
            b.iter(|| {
                let rows = RangeFilter::new(DateRange::default()).apply(table);
                black_box(pipeline.run(rows))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_range_filter,
    benchmark_correlation,
    benchmark_timestamp_parsing,
    benchmark_pipeline_by_size
);
criterion_main!(benches);
