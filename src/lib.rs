//! Hizuke Library
//!
//! Turns a date selection into Japanese date strings and compact `YYYYMMDD`
//! tokens. This library provides functionality to:
//! - Parse picker text (`YYYY/MM/DD`, `, `-delimited lists, weekdays)
//! - Expand a selection by mode (range, multiple, weekly)
//! - Format dates as `2025年7月1日（火）` and summarise ranges
//! - Render and copy the resulting text blocks
//! - Keep page-like application state for an interactive session
//!
//! # Example
//!
//! ```
//! use hizuke::date::parse_date_list;
//! use hizuke::render::render;
//! use hizuke::selection::{generate, Selection};
//!
//! let dates = parse_date_list("2025/07/01, 2025/07/12").unwrap();
//! let results = generate(&Selection::Range(dates)).unwrap();
//! let output = render(&results);
//!
//! assert_eq!(output.display_lines, vec!["2025年7月1日（火）～12日（土）"]);
//! assert!(output.combined.starts_with("20250701,20250702,"));
//! ```

pub mod clipboard;
pub mod date;
pub mod error;
pub mod format;
pub mod render;
pub mod selection;
pub mod session;

// Re-export commonly used items
pub use date::CalendarDate;
pub use error::{Error, Result};
pub use selection::{generate, ResultSet, Selection, SelectionMode};
