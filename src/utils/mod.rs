//! Small shared helpers: key casing, dates, HTML escaping.

pub mod case;
pub mod date;
pub mod html;

pub use case::{camel_case, title_case};
pub use date::{DateTimeUtc, is_date_string};
