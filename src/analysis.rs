use std::{collections::BTreeMap, fmt, ops::Range};

use miette::Diagnostic;
use thiserror::Error;

use crate::{
    date::{self, DateError, FORMAT},
    record::Record,
    store::RecordStore,
};

#[derive(Debug, Error, Diagnostic)]
#[error("Invalid date `{value}`, use {}", FORMAT)]
#[diagnostic(code(temperaturas::analysis::date))]
pub struct InvalidDate {
    pub value: String,
    #[source]
    #[diagnostic_source]
    pub source: DateError,
}

#[derive(Debug, Error, Diagnostic)]
pub enum RangeError {
    #[error("Invalid date `{value}`, use {}", FORMAT)]
    #[diagnostic(code(temperaturas::analysis::range_format))]
    InvalidFormat {
        value: String,
        #[source]
        #[diagnostic_source]
        source: DateError,
    },
    #[error("The start date {start} must be before or equal to the end date {end}")]
    #[diagnostic(code(temperaturas::analysis::inverted_range))]
    InvertedRange { start: String, end: String },
}

/// Hottest and coldest record of a single day. On ties the record coming
/// first in the store wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes<'a> {
    pub hottest: &'a Record,
    pub coldest: &'a Record,
}

impl fmt::Display for Extremes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Análisis para {}:\n\nCiudad más calurosa: {} ({:.1}°C)\nCiudad menos calurosa: {} ({:.1}°C)",
            self.hottest.date,
            self.hottest.city,
            self.hottest.temperature,
            self.coldest.city,
            self.coldest.temperature,
        )
    }
}

/// Mean temperature of every city seen in a date range, ready to be charted.
#[derive(Debug, Clone, PartialEq)]
pub struct CityAverages {
    start: String,
    end: String,
    // Never empty
    averages: BTreeMap<String, f64>,
}

impl CityAverages {
    /// The range start as it was asked for.
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn title(&self) -> String {
        format!(
            "Promedio de Temperatura por Ciudad ({} a {})",
            self.start, self.end
        )
    }

    pub fn get(&self, city: &str) -> Option<f64> {
        self.averages.get(city).copied()
    }

    pub fn len(&self) -> usize {
        self.averages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }

    /// Cities in alphabetical order with their mean temperature.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.averages
            .iter()
            .map(|(city, mean)| (city.as_str(), *mean))
    }

    /// Lowest to highest mean, to size a chart axis.
    pub fn range(&self) -> Range<f64> {
        self.averages
            .values()
            .copied()
            .min_by(f64::total_cmp)
            .unwrap_or_default()
            ..self
                .averages
                .values()
                .copied()
                .max_by(f64::total_cmp)
                .unwrap_or_default()
    }

    pub fn into_map(self) -> BTreeMap<String, f64> {
        self.averages
    }
}

impl RecordStore {
    /// Hottest and coldest records whose date is exactly `date`, compared as
    /// strings: `1/6/2024` doesn't match `01/06/2024`.
    ///
    /// `Ok(None)` when nothing was recorded that day.
    pub fn analyze_date(&self, date: &str) -> Result<Option<Extremes<'_>>, InvalidDate> {
        date::parse(date).map_err(|source| InvalidDate {
            value: date.to_string(),
            source,
        })?;

        let mut matching = self.iter().filter(|record| record.date == date);
        let Some(first) = matching.next() else {
            return Ok(None);
        };

        let extremes = matching.fold(
            Extremes {
                hottest: first,
                coldest: first,
            },
            |mut extremes, record| {
                if record.temperature.total_cmp(&extremes.hottest.temperature).is_gt() {
                    extremes.hottest = record;
                }
                if record.temperature.total_cmp(&extremes.coldest.temperature).is_lt() {
                    extremes.coldest = record;
                }
                extremes
            },
        );

        Ok(Some(extremes))
    }

    /// Mean temperature per city over the records dated between `start` and
    /// `end`, both included.
    ///
    /// Records whose date can't be parsed are left out. `Ok(None)` when no
    /// record falls in the range.
    pub fn average_by_city(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Option<CityAverages>, RangeError> {
        let bounds = bound(start)?..=bound(end)?;
        if bounds.start() > bounds.end() {
            return Err(RangeError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for record in self {
            match date::parse(&record.date) {
                Ok(day) if bounds.contains(&day) => {
                    let (sum, count) = sums.entry(record.city.as_str()).or_default();
                    *sum += record.temperature;
                    *count += 1;
                }
                Ok(_) => (),
                Err(e) => log::debug!(
                    "leaving out {} on `{}`: {e}",
                    record.city,
                    record.date
                ),
            }
        }

        if sums.is_empty() {
            return Ok(None);
        }

        let averages = sums
            .into_iter()
            .map(|(city, (sum, count))| (city.to_string(), sum / count as f64))
            .collect();

        Ok(Some(CityAverages {
            start: start.to_string(),
            end: end.to_string(),
            averages,
        }))
    }
}

fn bound(value: &str) -> Result<time::Date, RangeError> {
    date::parse(value).map_err(|source| RangeError::InvalidFormat {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(records: &[(&str, &str, f64)]) -> RecordStore {
        records
            .iter()
            .map(|(city, date, temperature)| Record::new(*city, *date, *temperature))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn hottest_and_coldest_of_the_day() {
        let store = store(&[
            ("Madrid", "01/06/2024", 28.5),
            ("Bilbao", "02/06/2024", 12.0),
            ("Sevilla", "01/06/2024", 33.2),
            ("Cadiz", "01/06/2024", 33.2),
        ]);

        let extremes = store.analyze_date("01/06/2024").unwrap().unwrap();
        assert_eq!(extremes.hottest, &Record::new("Sevilla", "01/06/2024", 33.2));
        assert_eq!(extremes.coldest, &Record::new("Madrid", "01/06/2024", 28.5));
    }

    #[test]
    fn ties_keep_the_first_record() {
        let store = store(&[
            ("Oviedo", "03/06/2024", 18.0),
            ("Gijon", "03/06/2024", 18.0),
            ("Leon", "03/06/2024", 18.0),
        ]);

        let extremes = store.analyze_date("03/06/2024").unwrap().unwrap();
        assert_eq!(extremes.hottest.city, "Oviedo");
        assert_eq!(extremes.coldest.city, "Oviedo");
    }

    #[test]
    fn single_record_is_both_extremes() {
        let store = store(&[("Soria", "10/01/2024", -4.0)]);

        let extremes = store.analyze_date("10/01/2024").unwrap().unwrap();
        assert!(std::ptr::eq(extremes.hottest, extremes.coldest));
    }

    #[test]
    fn date_lookup_is_by_exact_string() {
        let store = store(&[("Madrid", "01/01/2024", 5.0)]);

        assert!(store.analyze_date("1/1/2024").unwrap().is_none());
        assert!(store.analyze_date("01/01/2024").unwrap().is_some());
    }

    #[test]
    fn no_data_for_the_day() {
        assert!(RecordStore::new()
            .analyze_date("01/06/2024")
            .unwrap()
            .is_none());
    }

    #[test]
    fn invalid_date_to_analyze() {
        let store = store(&[("Madrid", "31/02/2024", 5.0)]);

        let error = store.analyze_date("31/02/2024").unwrap_err();
        assert_eq!(error.value, "31/02/2024");
        assert!(matches!(error.source, DateError::InvalidDate(_)));
        assert!(store.analyze_date("hoy").is_err());
    }

    #[test]
    fn extremes_message() {
        let store = store(&[
            ("Madrid", "01/06/2024", 28.5),
            ("Sevilla", "01/06/2024", 33.2),
        ]);
        let extremes = store.analyze_date("01/06/2024").unwrap().unwrap();

        assert_eq!(
            extremes.to_string(),
            "Análisis para 01/06/2024:\n\nCiudad más calurosa: Sevilla (33.2°C)\nCiudad menos calurosa: Madrid (28.5°C)"
        );
    }

    #[test]
    fn averages_per_city() {
        let store = store(&[
            ("Madrid", "01/06/2024", 28.5),
            ("Sevilla", "01/06/2024", 33.2),
            ("Madrid", "02/06/2024", 29.5),
            ("Madrid", "03/06/2024", 40.0),
            ("Bilbao", "31/05/2024", 15.0),
        ]);

        let averages = store
            .average_by_city("01/06/2024", "02/06/2024")
            .unwrap()
            .unwrap();

        assert_eq!(
            averages.into_map(),
            BTreeMap::from([
                (String::from("Madrid"), 29.0),
                (String::from("Sevilla"), 33.2),
            ])
        );
    }

    #[test]
    fn range_bounds_are_inclusive_and_may_be_equal() {
        let store = store(&[("Madrid", "1/6/2024", 28.5), ("Toledo", "02/06/2024", 31.0)]);

        let averages = store
            .average_by_city("01/06/2024", "01/06/2024")
            .unwrap()
            .unwrap();
        assert_eq!(averages.len(), 1);
        assert_eq!(averages.get("Madrid"), Some(28.5));
        assert_eq!(averages.get("Toledo"), None);
    }

    #[test]
    fn unparsable_record_dates_are_left_out() {
        let store = store(&[
            ("Madrid", "01/06/2024", 28.5),
            ("Cadiz", "bad", 30.0),
            ("Malaga", "31/06/2024", 30.0),
        ]);

        let averages = store
            .average_by_city("01/01/2024", "31/12/2024")
            .unwrap()
            .unwrap();
        assert_eq!(averages.iter().collect::<Vec<_>>(), [("Madrid", 28.5)]);
    }

    #[test]
    fn empty_range() {
        let store = store(&[("Madrid", "01/06/2024", 28.5)]);

        assert_eq!(store.average_by_city("01/07/2024", "31/07/2024").unwrap(), None);
    }

    #[test]
    fn inverted_range() {
        let store = store(&[("Madrid", "01/06/2024", 28.5)]);

        assert!(matches!(
            store.average_by_city("05/06/2024", "01/06/2024"),
            Err(RangeError::InvertedRange { .. })
        ));
    }

    #[test]
    fn invalid_range_bounds() {
        let store = RecordStore::new();

        match store.average_by_city("01/06/2024", "32/06/2024") {
            Err(RangeError::InvalidFormat { value, .. }) => assert_eq!(value, "32/06/2024"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            store.average_by_city("junio", "01/06/2024"),
            Err(RangeError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn non_finite_temperatures_propagate() {
        let store = store(&[("Madrid", "01/06/2024", 20.0), ("Madrid", "02/06/2024", f64::NAN)]);

        let averages = store
            .average_by_city("01/06/2024", "02/06/2024")
            .unwrap()
            .unwrap();
        assert!(averages.get("Madrid").unwrap().is_nan());
    }

    #[test]
    fn chart_helpers() {
        let store = store(&[
            ("Sevilla", "01/06/2024", 33.0),
            ("Burgos", "01/06/2024", -1.0),
            ("Madrid", "01/06/2024", 28.0),
        ]);

        let averages = store
            .average_by_city("01/06/2024", "02/06/2024")
            .unwrap()
            .unwrap();
        assert_eq!(
            averages.title(),
            "Promedio de Temperatura por Ciudad (01/06/2024 a 02/06/2024)"
        );
        assert_eq!(averages.range(), -1.0..33.0);
        assert_eq!(
            averages.iter().map(|(city, _)| city).collect::<Vec<_>>(),
            ["Burgos", "Madrid", "Sevilla"]
        );
    }
}
