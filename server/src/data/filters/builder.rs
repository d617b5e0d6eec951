//! Predicate builder
//!
//! Turns loosely-typed request parameters into a [`Predicate`]. The
//! days-ago shortcut and the explicit date/time keys are mutually
//! exclusive: when `daysago` is present the other four keys are never
//! looked at, even if they are malformed.

use chrono::NaiveDate;

use super::days_ago;
use super::types::{DATE_COLUMN, FieldFilter, FilterError, Predicate, RangeOp, TemporalParam};
use super::validate::{validate_date, validate_time};

/// Recognized filter parameters, as raw strings from the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    pub daysago: Option<String>,
    pub sdate: Option<String>,
    pub edate: Option<String>,
    pub stime: Option<String>,
    pub etime: Option<String>,
    pub param: Option<String>,
}

impl RequestParameters {
    /// Collect recognized keys from query pairs. The first occurrence of a
    /// repeated key wins; unrecognized keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "daysago" => &mut params.daysago,
                "sdate" => &mut params.sdate,
                "edate" => &mut params.edate,
                "stime" => &mut params.stime,
                "etime" => &mut params.etime,
                "param" => &mut params.param,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    fn temporal(&self, which: TemporalParam) -> Option<&str> {
        match which {
            TemporalParam::StartDate => self.sdate.as_deref(),
            TemporalParam::EndDate => self.edate.as_deref(),
            TemporalParam::StartTime => self.stime.as_deref(),
            TemporalParam::EndTime => self.etime.as_deref(),
        }
    }
}

/// Build a predicate using the same clock as [`days_ago::resolve`]
pub fn build_predicate(params: &RequestParameters) -> Result<Predicate, FilterError> {
    build_predicate_at(params, days_ago::today())
}

/// Build a predicate relative to a fixed `today`.
///
/// The first invalid parameter short-circuits; no partial predicate is
/// returned alongside an error.
pub fn build_predicate_at(
    params: &RequestParameters,
    today: NaiveDate,
) -> Result<Predicate, FilterError> {
    let mut predicate = Predicate::default();

    if let Some(raw) = params.daysago.as_deref() {
        let days: i64 = raw.parse().map_err(|_| FilterError::InvalidDaysAgo)?;
        let range = days_ago::resolve_from(today, days)?;
        predicate.push_range(DATE_COLUMN, RangeOp::Gte, range.start_str());
        predicate.push_range(DATE_COLUMN, RangeOp::Lte, range.end_str());
    } else {
        for which in TemporalParam::ALL {
            let Some(value) = params.temporal(which) else {
                continue;
            };
            if which.is_date() {
                if !validate_date(value) {
                    return Err(FilterError::InvalidDateFormat { field: which });
                }
            } else if !validate_time(value) {
                return Err(FilterError::InvalidTimeFormat { field: which });
            }
            predicate.push_range(which.column(), which.operator(), value);
        }
    }

    if let Some(raw) = params.param.as_deref() {
        predicate.fields = FieldFilter::parse(raw);
    }

    Ok(predicate)
}
