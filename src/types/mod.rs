//! XMP value types
//!
//! This module defines the value containers used by namespace models:
//! simple text, proper names, dates, ordered and unordered arrays, and
//! language alternatives.

pub mod array;
pub mod date;
pub mod value;

pub use array::{LangAlt, OrderedArray, UnorderedArray, DEFAULT_LANGUAGE};
pub use date::{Date, Time, TimeZone};
pub use value::{PropertyValue, ProperName, Scalar, Text};
