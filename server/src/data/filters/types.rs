//! Filter type definitions
//!
//! A [`Predicate`] is structured data: range comparisons on the date/time
//! columns plus an optional field-equality group. SQL text is produced only
//! through [`Predicate::to_sql`], which emits `?` placeholders and collects
//! literals into [`SqlParams`].

use std::fmt;

use thiserror::Error;

/// Date column shared by every readings table
pub const DATE_COLUMN: &str = "tdate";

/// Time-of-day column shared by every readings table
pub const TIME_COLUMN: &str = "ttime";

/// Categorical measurement-name column shared by every readings table
pub const FIELD_COLUMN: &str = "param";

/// Inclusive range comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Gte,
    Lte,
}

impl RangeOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// Single `column op literal` comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeConstraint {
    pub column: &'static str,
    pub operator: RangeOp,
    pub value: String,
}

/// Restricts rows to those whose `param` column equals one of `names`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub names: Vec<String>,
}

impl FieldFilter {
    /// Split a comma-separated `param` value into field names.
    ///
    /// Tokens are kept verbatim (no trimming). Empty tokens are dropped, so
    /// `"temp,"` is the same as `"temp"`; a value with no non-empty token
    /// yields `None` and adds no constraint.
    pub fn parse(raw: &str) -> Option<Self> {
        let names: Vec<String> = raw
            .split(',')
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(Self { names })
        }
    }

    /// Render as `(param = ? OR param = ? ...)`
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        let conditions: Vec<String> = self
            .names
            .iter()
            .map(|name| {
                params.values.push(name.clone());
                format!("{} = ?", FIELD_COLUMN)
            })
            .collect();

        format!("({})", conditions.join(" OR "))
    }
}

/// Conjunction of range constraints and an optional field group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    pub ranges: Vec<RangeConstraint>,
    pub fields: Option<FieldFilter>,
}

impl Predicate {
    pub fn push_range(&mut self, column: &'static str, operator: RangeOp, value: impl Into<String>) {
        self.ranges.push(RangeConstraint {
            column,
            operator,
            value: value.into(),
        });
    }

    /// True when the predicate matches every row
    pub fn is_unconditional(&self) -> bool {
        self.ranges.is_empty() && self.fields.is_none()
    }

    /// Generate the SQL WHERE body with `?` placeholders, pushing literals
    /// onto `params` in placeholder order. An unconditional predicate
    /// renders as `1=1`.
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        let mut clauses: Vec<String> = self
            .ranges
            .iter()
            .map(|range| {
                params.values.push(range.value.clone());
                format!("{} {} ?", range.column, range.operator.as_sql())
            })
            .collect();

        if let Some(fields) = &self.fields {
            clauses.push(fields.to_sql(params));
        }

        if clauses.is_empty() {
            "1=1".to_string()
        } else {
            clauses.join(" AND ")
        }
    }
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<String>,
}

/// Explicit date/time request parameters, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalParam {
    StartDate,
    EndDate,
    StartTime,
    EndTime,
}

impl TemporalParam {
    pub const ALL: [TemporalParam; 4] = [
        Self::StartDate,
        Self::EndDate,
        Self::StartTime,
        Self::EndTime,
    ];

    /// Query-string key
    pub fn key(&self) -> &'static str {
        match self {
            Self::StartDate => "sdate",
            Self::EndDate => "edate",
            Self::StartTime => "stime",
            Self::EndTime => "etime",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::StartDate | Self::EndDate => DATE_COLUMN,
            Self::StartTime | Self::EndTime => TIME_COLUMN,
        }
    }

    pub fn operator(&self) -> RangeOp {
        match self {
            Self::StartDate | Self::StartTime => RangeOp::Gte,
            Self::EndDate | Self::EndTime => RangeOp::Lte,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::StartDate | Self::EndDate)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::StartDate => "start date",
            Self::EndDate => "end date",
            Self::StartTime => "start time",
            Self::EndTime => "end time",
        }
    }
}

impl fmt::Display for TemporalParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key(), self.label())
    }
}

/// Client-input errors raised while building a predicate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid daysago value. The days ago value must be a positive integer")]
    InvalidDaysAgo,

    #[error("Invalid date format: {field}. Date filters must be formatted as YYYY-MM-DD")]
    InvalidDateFormat { field: TemporalParam },

    #[error("Invalid time format: {field}. Time filters must be formatted as HH:MM:00")]
    InvalidTimeFormat { field: TemporalParam },
}

impl FilterError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDaysAgo => "INVALID_DAYS_AGO",
            Self::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            Self::InvalidTimeFormat { .. } => "INVALID_TIME_FORMAT",
        }
    }

    /// Query-string key of the offending parameter
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDaysAgo => "daysago",
            Self::InvalidDateFormat { field } | Self::InvalidTimeFormat { field } => field.key(),
        }
    }
}
