use chrono::Datelike;

use crate::models::{CleanObservation, Season, TimestampedObservation};

/// Expands each observation's timestamp into calendar fields and a season.
///
/// Pure derivation: the same timestamp always yields the same fields, and
/// re-deriving an already-derived observation changes nothing.
pub struct CalendarDeriver;

impl CalendarDeriver {
    pub fn new() -> Self {
        Self
    }

    pub fn derive(&self, observations: Vec<TimestampedObservation>) -> Vec<CleanObservation> {
        observations
            .into_iter()
            .map(|obs| self.derive_one(obs))
            .collect()
    }

    fn derive_one(&self, obs: TimestampedObservation) -> CleanObservation {
        let date = obs.timestamp.date();

        CleanObservation {
            timestamp: obs.timestamp,
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            season: Season::from_month(date.month()),
            values: obs.values,
            indicators: obs.indicators,
            extras: obs.extras,
        }
    }
}

impl Default for CalendarDeriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Locale-independent English month name for a 1-based month.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContinuousValues, IndicatorValues};
    use crate::processors::coercer::parse_timestamp;

    fn timestamped(raw: &str) -> TimestampedObservation {
        TimestampedObservation {
            timestamp: parse_timestamp(raw).unwrap(),
            values: ContinuousValues::default(),
            indicators: IndicatorValues::default(),
            extras: Vec::new(),
        }
    }

    #[test]
    fn test_calendar_fields() {
        let clean = CalendarDeriver::new().derive(vec![timestamped("19961101-11:00")]);
        let obs = &clean[0];

        assert_eq!(obs.date.to_string(), "1996-11-01");
        assert_eq!(obs.year, 1996);
        assert_eq!(obs.month, 11);
        assert_eq!(obs.day, 1);
        assert_eq!(obs.season, Season::PostMonsoon);
        assert_eq!(month_name(obs.month), "November");
    }

    #[test]
    fn test_derivation_is_stable() {
        let deriver = CalendarDeriver::new();
        let once = deriver.derive(vec![timestamped("2017-06-15 08:30:00")]);
        let again = deriver.derive(vec![timestamped("2017-06-15 08:30:00")]);
        assert_eq!(once, again);
    }

    #[test]
    fn test_month_names_are_english_full_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(6), "June");
        assert_eq!(month_name(12), "December");
    }

    #[test]
    fn test_season_assignment_follows_month() {
        let deriver = CalendarDeriver::new();
        let winter = deriver.derive(vec![timestamped("2017-01-10 00:00:00")]);
        let monsoon = deriver.derive(vec![timestamped("2017-07-10 00:00:00")]);

        assert_eq!(winter[0].season, Season::Winter);
        assert_eq!(monsoon[0].season, Season::Monsoon);
    }
}
