/// Raw header name of the timestamp column
pub const TIMESTAMP_COLUMN: &str = "datetime_utc";

/// Accepted timestamp layouts, tried in order. The compact `%Y%m%d-%H:%M`
/// form is the native layout of the source dataset.
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y%m%d-%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Accepted date-only layouts; these parse to midnight
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Timestamp layout used in the cleaned dataset export
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Derived columns appended to the cleaned dataset export
pub const DERIVED_COLUMNS: &[&str] = &["date", "year", "month", "day", "month_name", "season"];

/// Output file names
pub const CLEANED_DATASET_FILE: &str = "cleaned_weather.csv";
pub const DAILY_TEMPERATURE_PLOT: &str = "daily_temperature.png";
pub const MONTHLY_RAINFALL_PLOT: &str = "monthly_rainfall.png";
pub const HUMIDITY_TEMPERATURE_PLOT: &str = "humidity_vs_temperature.png";
pub const COMBINED_PLOT: &str = "combined_plots.png";

/// Chart geometry
pub const CHART_WIDTH: u32 = 1280;
pub const CHART_HEIGHT: u32 = 720;
pub const COMBINED_CHART_HEIGHT: u32 = 960;
