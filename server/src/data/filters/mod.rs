//! Reading filter system
//!
//! Builds a validated, parameterized predicate from the `daysago`, `sdate`,
//! `edate`, `stime`, `etime` and `param` query keys. The same predicate is
//! applied to every readings table through the shared `tdate`, `ttime` and
//! `param` columns.
//!
//! ## Usage
//!
//! ```no_run
//! use urbanhome_server::data::filters::{RequestParameters, SqlParams, build_predicate};
//!
//! let params = RequestParameters::from_pairs([("sdate", "2023-01-01"), ("param", "temp")]);
//! let predicate = build_predicate(&params).unwrap();
//! let mut sql_params = SqlParams::default();
//! let where_sql = predicate.to_sql(&mut sql_params);
//! ```

mod builder;
pub mod days_ago;
mod types;
pub mod validate;

pub use builder::{RequestParameters, build_predicate, build_predicate_at};
pub use days_ago::DateRange;
pub use types::{
    DATE_COLUMN, FIELD_COLUMN, FieldFilter, FilterError, Predicate, RangeConstraint, RangeOp,
    SqlParams, TIME_COLUMN, TemporalParam,
};
pub use validate::{validate_date, validate_time};
