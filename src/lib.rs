//! City temperature observations: a small editable table persisted as a flat
//! `Ciudad,Fecha,Temperatura` file, with two analyses on top of it. The
//! hottest and coldest city of a day, and the mean temperature of every city
//! over a date range.

pub mod analysis;
pub mod csv;
pub mod date;
pub mod record;
pub mod store;
pub mod workbook;

pub use analysis::{CityAverages, Extremes, InvalidDate, RangeError};
pub use csv::{FileError, MalformedFile};
pub use record::{Record, Row};
pub use store::RecordStore;
pub use workbook::Workbook;
