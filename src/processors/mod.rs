pub mod aggregator;
pub mod calendar;
pub mod coercer;
pub mod imputer;
pub mod normalizer;
pub mod rainfall;

pub use aggregator::Aggregator;
pub use calendar::CalendarDeriver;
pub use coercer::TypeCoercer;
pub use imputer::{CleaningReport, MissingValuePolicy};
pub use normalizer::SchemaNormalizer;
pub use rainfall::RainfallSelector;

use crate::error::Result;
use crate::models::{CleanDataset, RawTable, SchemaBinding};

/// The cleaning pipeline: normalize headers, bind the schema, coerce
/// types, apply the missing-value policy, derive calendar fields.
///
/// Each stage consumes the previous stage's output and returns a new
/// collection; nothing here mutates shared state.
pub fn clean_raw_table(raw: RawTable) -> Result<(CleanDataset, CleaningReport)> {
    let normalized = SchemaNormalizer::new().normalize(raw);
    let binding = SchemaBinding::bind(&normalized.headers)?;
    let presence = binding.presence();
    let extra_columns: Vec<String> = binding
        .extras()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();

    let coerced = TypeCoercer::new().coerce(&normalized, &binding);
    let (surviving, report) = MissingValuePolicy::new().apply(coerced, &presence);
    let observations = CalendarDeriver::new().derive(surviving);

    Ok((
        CleanDataset {
            observations,
            columns: presence,
            extra_columns,
        },
        report,
    ))
}
