/// Dataset column names
pub const COL_DATE: &str = "date";
pub const COL_STATION: &str = "station";
pub const COL_O3: &str = "O3";
pub const COL_SO2: &str = "SO2";
pub const COL_PM25: &str = "PM2.5";
pub const COL_PM10: &str = "PM10";
pub const COL_WSPM: &str = "WSPM";
pub const COL_TEMP: &str = "TEMP";
pub const COL_PRES: &str = "PRES";
pub const COL_TEMP_BIN: &str = "temp_bin";

/// Accepted textual timestamp layouts, tried in order
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Cell values read as a missing measurement (compared case-insensitively)
pub const MISSING_TOKENS: &[&str] = &["", "na", "nan", "null"];

/// Monday-based weekday index where the weekend begins (Saturday)
pub const WEEKEND_START_INDEX: u32 = 5;

pub const DAY_TYPE_WEEKDAY: &str = "weekday";
pub const DAY_TYPE_WEEKEND: &str = "weekend";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_PARQUET_BATCH_SIZE: usize = 8192;

/// Configuration defaults
pub const DEFAULT_DATASET_PATH: &str = "dashboard/all_data.csv";
pub const DEFAULT_CONFIG_FILE: &str = "airq.toml";
pub const CONFIG_ENV_PREFIX: &str = "AIRQ";
pub const DEFAULT_BAR_WIDTH: usize = 40;
pub const DEFAULT_PRECISION: usize = 2;

/// Dashboard header
pub const DASHBOARD_TITLE: &str = "Air Quality Dashboard: China (2013 - 2017)";
