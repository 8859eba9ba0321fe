//! Typed decoding of parsed query parameters.
//!
//! Web frameworks hand over a query string as a multimap: every key with the
//! list of values it was given. This crate decodes such a multimap into a
//! struct, field by field, with strict rules:
//!
//! - every key in the input must belong to some field, otherwise decoding
//!   fails (see [`Config::strict`] to relax this);
//! - scalar fields take exactly one value;
//! - `bool` fields are flags: `?verbose` sets them, `?verbose=1` is an error;
//! - `Vec<T>` fields take one comma-separated value: `?ids=1,2,3`;
//! - absent keys leave the field as it was.
//!
//! Every error maps to `400 Bad Request` via [`Error::status`].
//!
//! Parsing the raw query string, and serializing records back to one, are
//! left to other crates.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//!
//! use query_values::{Record, Values};
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! struct Paging {
//!     page: u32,
//!     per_page: Option<u32>,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! struct Query {
//!     name: String,
//!     #[query(rename = "id")]
//!     user_ids: Vec<u64>,
//!     verbose: bool,
//!     timeout: Duration,
//!     #[query(flatten)]
//!     paging: Paging,
//!     #[query(skip)]
//!     internal: String,
//! }
//!
//! let mut values = Values::new();
//! values.insert("name".to_owned(), vec!["Acme".to_owned()]);
//! values.insert("id".to_owned(), vec!["1,2,3".to_owned()]);
//! values.insert("verbose".to_owned(), vec!["".to_owned()]);
//! values.insert("timeout".to_owned(), vec!["1m30s".to_owned()]);
//! values.insert("page".to_owned(), vec!["2".to_owned()]);
//!
//! let query: Query = query_values::from_values(&values).unwrap();
//! assert_eq!(
//!     query,
//!     Query {
//!         name: "Acme".to_owned(),
//!         user_ids: vec![1, 2, 3],
//!         verbose: true,
//!         timeout: Duration::from_secs(90),
//!         paging: Paging { page: 2, per_page: None },
//!         internal: String::new(),
//!     }
//! );
//!
//! values.insert("pgae".to_owned(), vec!["3".to_owned()]);
//! let err = query_values::from_values::<Query>(&values).unwrap_err();
//! assert_eq!(err.to_string(), r#"unknown query: "pgae""#);
//! ```
//!
//! ## Field attributes
//!
//! - `#[query(rename = "key")]` reads the field from `key`.
//! - `#[query(rename = "*")]` derives the key from the field name, which is
//!   also what happens without any attribute.
//! - `#[query(skip)]`, `#[query(rename = "")]` or `#[query(rename = "-")]`
//!   leaves the field out.
//! - `#[query(flatten)]` embeds a record: its keys are read at the same
//!   level as the parent's, with no prefix.
//! - `#[query(text)]` decodes the field with its `serde::Deserialize`
//!   implementation, see [`Text`].
//!
//! Keys are derived from field names with the container's
//! `#[query(rename_all = "...")]` rule, `snake_case` by default.
//!
//! ## Custom types
//!
//! Implement [`Scalar`] to parse a type from one string, or [`Field`] to
//! take every value given for its key. Override [`Record::decode_values`]
//! to take the whole multimap.

extern crate self as query_values;

mod config;
mod de;
mod error;
pub mod helpers;
mod map;

#[doc(inline)]
pub use crate::config::Config;
#[doc(inline)]
pub use crate::de::{Field, Record, Scalar, Target, Text, Walker, decode_into, from_values};
#[doc(inline)]
pub use crate::error::{Error, Reason, Result};
#[doc(inline)]
pub use crate::map::{Map, Multimap, Values};

#[cfg(feature = "derive")]
pub use query_values_derive::Record;

#[doc(hidden)]
pub mod __private {
    pub use serde::de::DeserializeOwned;
}
