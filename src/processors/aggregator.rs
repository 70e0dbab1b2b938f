use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    CleanDataset, ClimateSummary, ContinuousColumn, Season, TemperatureSummary,
};

/// Groups clean observations by calendar and seasonal buckets and derives
/// descriptive statistics per group.
///
/// Grouping never drops a single-member group, and zero or negative
/// readings aggregate like any other value; only absent columns are
/// skipped. All tables are `BTreeMap`s, so keys come out in ascending
/// order.
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// Temperature mean/min/max/std per calendar date.
    pub fn daily_temperature(
        &self,
        dataset: &CleanDataset,
    ) -> BTreeMap<NaiveDate, TemperatureSummary> {
        self.temperature_summaries(dataset, |obs_date, _, _| obs_date)
    }

    /// Temperature mean/min/max/std per (year, month) pair.
    pub fn monthly_temperature(
        &self,
        dataset: &CleanDataset,
    ) -> BTreeMap<(i32, u32), TemperatureSummary> {
        self.temperature_summaries(dataset, |_, year, month| (year, month))
    }

    /// Temperature mean/min/max/std per year.
    pub fn yearly_temperature(&self, dataset: &CleanDataset) -> BTreeMap<i32, TemperatureSummary> {
        self.temperature_summaries(dataset, |_, year, _| year)
    }

    /// Mean temperature, mean humidity, and total precipitation per
    /// calendar month (1-12), across all years.
    pub fn monthly_climate(&self, dataset: &CleanDataset) -> BTreeMap<u32, ClimateSummary> {
        self.climate_summaries(dataset, |obs| obs.month)
    }

    /// Mean temperature, mean humidity, and total precipitation per season.
    pub fn seasonal_climate(&self, dataset: &CleanDataset) -> BTreeMap<Season, ClimateSummary> {
        self.climate_summaries(dataset, |obs| obs.season)
    }

    /// Per-date mean of one continuous column; used by the combined chart.
    pub fn daily_mean(
        &self,
        dataset: &CleanDataset,
        col: ContinuousColumn,
    ) -> BTreeMap<NaiveDate, f64> {
        let mut groups: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for obs in &dataset.observations {
            if let Some(value) = obs.values.get(col) {
                groups.entry(obs.date).or_default().push(value);
            }
        }

        groups
            .into_iter()
            .map(|(date, values)| (date, mean(&values)))
            .collect()
    }

    fn temperature_summaries<K, F>(
        &self,
        dataset: &CleanDataset,
        key_fn: F,
    ) -> BTreeMap<K, TemperatureSummary>
    where
        K: Ord,
        F: Fn(NaiveDate, i32, u32) -> K,
    {
        let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
        for obs in &dataset.observations {
            if let Some(temperature) = obs.temperature() {
                groups
                    .entry(key_fn(obs.date, obs.year, obs.month))
                    .or_default()
                    .push(temperature);
            }
        }

        groups
            .into_iter()
            .map(|(key, values)| (key, summarize(&values)))
            .collect()
    }

    fn climate_summaries<K, F>(&self, dataset: &CleanDataset, key_fn: F) -> BTreeMap<K, ClimateSummary>
    where
        K: Ord + Copy,
        F: Fn(&crate::models::CleanObservation) -> K,
    {
        #[derive(Default)]
        struct Accumulator {
            temperatures: Vec<f64>,
            humidities: Vec<f64>,
            precipitation: f64,
        }

        let has_temperature = dataset.columns.has(ContinuousColumn::Temperature);
        let has_humidity = dataset.columns.has(ContinuousColumn::Humidity);
        let has_precipitation = dataset.columns.has(ContinuousColumn::Precipitation);

        let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
        for obs in &dataset.observations {
            let acc = groups.entry(key_fn(obs)).or_default();
            if let Some(temperature) = obs.temperature() {
                acc.temperatures.push(temperature);
            }
            if let Some(humidity) = obs.humidity() {
                acc.humidities.push(humidity);
            }
            if let Some(precipitation) = obs.precipitation() {
                acc.precipitation += precipitation;
            }
        }

        groups
            .into_iter()
            .map(|(key, acc)| {
                let summary = ClimateSummary {
                    mean_temperature: has_temperature.then(|| mean(&acc.temperatures)),
                    mean_humidity: has_humidity.then(|| mean(&acc.humidities)),
                    total_precipitation: has_precipitation.then_some(acc.precipitation),
                };
                (key, summary)
            })
            .collect()
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation. A single-element group has zero dispersion by
/// definition here; the n-1 divisor is only applied when n >= 2.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

fn summarize(values: &[f64]) -> TemperatureSummary {
    let mean = mean(values);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    TemperatureSummary {
        mean,
        min,
        max,
        std_dev: std_dev(values, mean),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CleanObservation, ContinuousValues, IndicatorValues, SchemaBinding, Season,
    };
    use crate::processors::coercer::parse_timestamp;
    use chrono::Datelike;

    fn observation(raw_timestamp: &str, temperature: f64, humidity: f64, precip: f64) -> CleanObservation {
        let timestamp = parse_timestamp(raw_timestamp).unwrap();
        let date = timestamp.date();
        let mut values = ContinuousValues::default();
        values.set(ContinuousColumn::Temperature, Some(temperature));
        values.set(ContinuousColumn::Humidity, Some(humidity));
        values.set(ContinuousColumn::Precipitation, Some(precip));

        CleanObservation {
            timestamp,
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            season: Season::from_month(date.month()),
            values,
            indicators: IndicatorValues::default(),
            extras: Vec::new(),
        }
    }

    fn dataset(observations: Vec<CleanObservation>) -> CleanDataset {
        let headers: Vec<String> = ["datetime_utc", "_tempm", "_hum", "_precipm"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        CleanDataset {
            observations,
            columns: SchemaBinding::bind(&headers).unwrap().presence(),
            extra_columns: Vec::new(),
        }
    }

    #[test]
    fn test_daily_temperature_statistics() {
        let ds = dataset(vec![
            observation("2017-06-15 06:00:00", 20.0, 40.0, 0.0),
            observation("2017-06-15 12:00:00", 30.0, 35.0, 0.0),
            observation("2017-06-16 06:00:00", 25.0, 50.0, 0.0),
        ]);

        let daily = Aggregator::new().daily_temperature(&ds);
        assert_eq!(daily.len(), 2);

        let first = daily
            .get(&NaiveDate::from_ymd_opt(2017, 6, 15).unwrap())
            .unwrap();
        assert_eq!(first.mean, 25.0);
        assert_eq!(first.min, 20.0);
        assert_eq!(first.max, 30.0);
        // Sample std of [20, 30]: sqrt(50)
        assert!((first.std_dev - 50.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_single_member_group_std_is_zero() {
        let ds = dataset(vec![observation("2017-06-16 06:00:00", 25.0, 50.0, 0.0)]);

        let daily = Aggregator::new().daily_temperature(&ds);
        let only = daily.values().next().unwrap();
        assert_eq!(only.std_dev, 0.0);
        assert_eq!(only.mean, 25.0);
    }

    #[test]
    fn test_keys_ascend() {
        let ds = dataset(vec![
            observation("2017-06-16 06:00:00", 25.0, 50.0, 0.0),
            observation("2016-01-01 06:00:00", 5.0, 80.0, 0.0),
            observation("2017-06-15 06:00:00", 22.0, 55.0, 0.0),
        ]);

        let agg = Aggregator::new();
        let dates: Vec<NaiveDate> = agg.daily_temperature(&ds).into_keys().collect();
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));

        let months: Vec<(i32, u32)> = agg.monthly_temperature(&ds).into_keys().collect();
        assert_eq!(months, vec![(2016, 1), (2017, 6)]);

        let years: Vec<i32> = agg.yearly_temperature(&ds).into_keys().collect();
        assert_eq!(years, vec![2016, 2017]);
    }

    #[test]
    fn test_monthly_climate_sums_precipitation() {
        let ds = dataset(vec![
            observation("2016-07-01 06:00:00", 30.0, 70.0, 2.5),
            observation("2017-07-02 06:00:00", 32.0, 60.0, 1.5),
            observation("2017-08-01 06:00:00", 31.0, 65.0, 0.0),
        ]);

        let monthly = Aggregator::new().monthly_climate(&ds);
        // Month buckets span years: July 2016 and July 2017 share key 7.
        assert_eq!(monthly.len(), 2);

        let july = monthly.get(&7).unwrap();
        assert_eq!(july.mean_temperature, Some(31.0));
        assert_eq!(july.mean_humidity, Some(65.0));
        assert_eq!(july.total_precipitation, Some(4.0));

        let august = monthly.get(&8).unwrap();
        assert_eq!(august.total_precipitation, Some(0.0));
    }

    #[test]
    fn test_seasonal_climate_groups() {
        let ds = dataset(vec![
            observation("2017-01-15 06:00:00", 10.0, 80.0, 0.0),
            observation("2017-12-15 06:00:00", 12.0, 75.0, 1.0),
            observation("2017-07-15 06:00:00", 34.0, 60.0, 8.0),
        ]);

        let seasonal = Aggregator::new().seasonal_climate(&ds);
        assert_eq!(seasonal.len(), 2);

        let winter = seasonal.get(&Season::Winter).unwrap();
        assert_eq!(winter.mean_temperature, Some(11.0));
        assert_eq!(winter.total_precipitation, Some(1.0));

        let monsoon = seasonal.get(&Season::Monsoon).unwrap();
        assert_eq!(monsoon.mean_temperature, Some(34.0));
    }

    #[test]
    fn test_zero_and_negative_readings_are_aggregated() {
        let ds = dataset(vec![
            observation("2017-01-15 06:00:00", -5.0, 80.0, 0.0),
            observation("2017-01-15 18:00:00", 0.0, 70.0, 0.0),
        ]);

        let daily = Aggregator::new().daily_temperature(&ds);
        let day = daily.values().next().unwrap();
        assert_eq!(day.mean, -2.5);
        assert_eq!(day.min, -5.0);
        assert_eq!(day.max, 0.0);
    }

    #[test]
    fn test_absent_column_yields_empty_or_none() {
        // Dataset bound without temperature, humidity, or precipitation.
        let headers: Vec<String> = ["datetime_utc", "_pressurem"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut obs = observation("2017-06-15 06:00:00", 0.0, 0.0, 0.0);
        obs.values = ContinuousValues::default();

        let ds = CleanDataset {
            observations: vec![obs],
            columns: SchemaBinding::bind(&headers).unwrap().presence(),
            extra_columns: Vec::new(),
        };

        let agg = Aggregator::new();
        assert!(agg.daily_temperature(&ds).is_empty());

        let monthly = agg.monthly_climate(&ds);
        let june = monthly.get(&6).unwrap();
        assert_eq!(june.mean_temperature, None);
        assert_eq!(june.total_precipitation, None);
    }

    #[test]
    fn test_daily_mean_by_column() {
        let ds = dataset(vec![
            observation("2017-06-15 06:00:00", 20.0, 40.0, 0.0),
            observation("2017-06-15 12:00:00", 30.0, 60.0, 0.0),
        ]);

        let humidity = Aggregator::new().daily_mean(&ds, ContinuousColumn::Humidity);
        assert_eq!(
            humidity
                .get(&NaiveDate::from_ymd_opt(2017, 6, 15).unwrap())
                .copied(),
            Some(50.0)
        );
    }
}
