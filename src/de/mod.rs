//! Decoding support for parsed query values.
//!
//! ### An overview of the design
//!
//! The input is a multimap: every key maps to the list of values it was
//! given, in order. Parsing the querystring into that shape is left to the
//! HTTP layer; this module only decodes it.
//!
//! Decoding runs in four layers:
//!
//! - [`Target`] resolves the caller's value to a record, allocating any
//!   `Option` layer that is still `None`.
//! - [`Record`] is implemented per type, usually by `#[derive(Record)]`.
//!   `Record::walk` describes the fields of the type: which key each one is
//!   read from, which are skipped, which are embedded records whose fields
//!   share the parent's key scope. `Record::decode_values` may be overridden
//!   to take over the whole multimap.
//! - [`Walker`] drives the walk. It records every key a field asked for so
//!   that input keys nobody asked for can be rejected once the walk ends.
//! - [`Field`] and [`Scalar`] turn the values of a single key into a value.
//!   A `Field` sees the whole list; a `Scalar` sees one string.
//!
//! Errors are never recovered from. The first failing field aborts the
//! decode; fields decoded before it keep their new values.

mod duration;
mod field;
mod text;

use std::collections::HashSet;

use serde::de::DeserializeOwned;

pub use self::field::{Field, Scalar};
pub(crate) use self::field::{decode_list, single};
pub use self::text::Text;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::map::Multimap;

/// Decodes `values` into a fresh `T::default()`.
///
/// ```
/// use query_values::{Record, Values};
///
/// #[derive(Debug, Default, PartialEq, Record)]
/// struct Query {
///     name: String,
///     tags: Vec<String>,
/// }
///
/// let mut values = Values::new();
/// values.insert("name".to_owned(), vec!["ada".to_owned()]);
/// values.insert("tags".to_owned(), vec!["a,b,c".to_owned()]);
///
/// let query: Query = query_values::from_values(&values).unwrap();
/// assert_eq!(
///     query,
///     Query {
///         name: "ada".to_owned(),
///         tags: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
///     }
/// );
/// ```
pub fn from_values<T>(values: &impl Multimap) -> Result<T>
where
    T: Target + Default,
{
    Config::default().from_values(values)
}

/// Decodes `values` into an existing `target`.
///
/// Fields whose key is absent keep their current value. An empty multimap
/// leaves `target` untouched.
///
/// ```
/// use query_values::{Record, Values};
///
/// #[derive(Debug, Default, Record)]
/// struct Page {
///     page: u32,
///     per_page: u32,
/// }
///
/// let mut values = Values::new();
/// values.insert("page".to_owned(), vec!["3".to_owned()]);
///
/// let mut page = Page { page: 1, per_page: 50 };
/// query_values::decode_into(&values, &mut page).unwrap();
/// assert_eq!((page.page, page.per_page), (3, 50));
/// ```
pub fn decode_into<T>(values: &impl Multimap, target: &mut T) -> Result<()>
where
    T: Target + ?Sized,
{
    Config::default().decode_into(values, target)
}

pub(crate) fn decode_with<T>(config: &Config, values: &dyn Multimap, target: &mut T) -> Result<()>
where
    T: Target + ?Sized,
{
    if values.is_empty() {
        return Ok(());
    }
    target.decode_target(values, config)
}

/// A value that can be decoded into: a record, possibly behind layers of
/// `Option` and `Box`.
///
/// Absent `Option` layers are filled with `Default::default()` on the way
/// down, so decoding never fails on an uninitialized nested record.
pub trait Target {
    /// Decode the whole multimap into `self`.
    fn decode_target(&mut self, values: &dyn Multimap, config: &Config) -> Result<()>;

    /// Walk the fields of `self` as part of an enclosing record.
    fn walk_inline(&mut self, walker: &mut Walker<'_>) -> Result<()>;
}

impl<R: Record + ?Sized> Target for R {
    fn decode_target(&mut self, values: &dyn Multimap, config: &Config) -> Result<()> {
        self.decode_values(values, config)
    }

    fn walk_inline(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        self.walk(walker)
    }
}

impl<T: Target + Default> Target for Option<T> {
    fn decode_target(&mut self, values: &dyn Multimap, config: &Config) -> Result<()> {
        self.get_or_insert_with(T::default)
            .decode_target(values, config)
    }

    fn walk_inline(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        self.get_or_insert_with(T::default).walk_inline(walker)
    }
}

/// A record whose fields are read from query keys.
///
/// `walk` is the field table of the type: one call on the [`Walker`] per
/// field that takes part in decoding. It is normally generated with
/// `#[derive(Record)]`, but can be written by hand:
///
/// ```
/// use query_values::{Record, Result, Walker};
///
/// #[derive(Default)]
/// struct Search {
///     query: String,
///     limit: Option<u32>,
///     cursor: Option<String>,
/// }
///
/// impl Record for Search {
///     fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
///         walker.field("q", &mut self.query)?;
///         walker.field("limit", &mut self.limit)?;
///         // `cursor` is set by the handler, never from the query
///         Ok(())
///     }
/// }
/// ```
///
/// Overriding `decode_values` replaces field-by-field decoding entirely.
/// The override receives the multimap as given and its result is returned
/// to the caller unchanged; no unknown-key check is made on its behalf.
/// Records embedded in another record are always walked.
pub trait Record {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()>;

    fn decode_values(&mut self, values: &dyn Multimap, config: &Config) -> Result<()> {
        let mut walker = Walker::new(values);
        self.walk(&mut walker)?;
        walker.finish(config)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        (**self).walk(walker)
    }

    fn decode_values(&mut self, values: &dyn Multimap, config: &Config) -> Result<()> {
        (**self).decode_values(values, config)
    }
}

/// Walks the fields of a record, tracking which keys were asked for.
pub struct Walker<'a> {
    values: &'a dyn Multimap,
    known: HashSet<String>,
}

impl<'a> Walker<'a> {
    pub fn new(values: &'a dyn Multimap) -> Self {
        Walker {
            values,
            known: HashSet::new(),
        }
    }

    /// Decode the field read from `key`.
    ///
    /// The key becomes known whether or not it is present. A field whose key
    /// is absent keeps its value.
    pub fn field<F>(&mut self, key: &str, field: &mut F) -> Result<()>
    where
        F: Field + ?Sized,
    {
        let Some(values) = self.lookup(key) else {
            return Ok(());
        };
        field
            .decode_field(values)
            .map_err(|reason| Error::value(key, reason))
    }

    /// Decode the field read from `key` with its `serde::Deserialize`
    /// implementation, as if by [`Text`].
    pub fn text<T>(&mut self, key: &str, field: &mut T) -> Result<()>
    where
        T: DeserializeOwned,
    {
        let Some(values) = self.lookup(key) else {
            return Ok(());
        };
        *field = single(values)
            .and_then(text::from_text)
            .map_err(|reason| Error::value(key, reason))?;
        Ok(())
    }

    /// Walk an embedded record in place. Its keys are read from, and become
    /// known in, the same scope as the enclosing record's.
    pub fn embed<T>(&mut self, record: &mut T) -> Result<()>
    where
        T: Target + ?Sized,
    {
        record.walk_inline(self)
    }

    /// Whether some field has asked for `key` so far.
    pub fn is_known(&self, key: &str) -> bool {
        self.known.contains(key)
    }

    /// End the walk, checking every input key against the known keys.
    pub fn finish(self, config: &Config) -> Result<()> {
        for key in self.values.keys() {
            if self.known.contains(key) {
                continue;
            }
            if config.is_strict() {
                tracing::debug!(key, "rejecting unknown query key");
                return Err(Error::UnknownKey(key.to_owned()));
            }
            tracing::debug!(key, "ignoring unknown query key");
        }
        Ok(())
    }

    fn lookup(&mut self, key: &str) -> Option<&'a [String]> {
        if !self.known.contains(key) {
            self.known.insert(key.to_owned());
        }
        let values = self.values.get_all(key)?;
        tracing::trace!(key, count = values.len(), "decoding query key");
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Reason;
    use crate::map::Values;

    fn values(pairs: &[(&str, &[&str])]) -> Values {
        pairs
            .iter()
            .map(|(key, values)| {
                (
                    (*key).to_owned(),
                    values.iter().map(|v| (*v).to_owned()).collect(),
                )
            })
            .collect()
    }

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        limit: u32,
    }

    impl Record for Inner {
        fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
            walker.field("limit", &mut self.limit)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        name: String,
        hidden: String,
        inner: Option<Box<Inner>>,
    }

    impl Record for Outer {
        fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
            walker.field("name", &mut self.name)?;
            walker.embed(&mut self.inner)
        }
    }

    #[test]
    fn walks_embedded_records_in_the_same_scope() {
        let input = values(&[("name", &["ada"]), ("limit", &["10"])]);
        let outer: Outer = from_values(&input).unwrap();
        assert_eq!(outer.name, "ada");
        assert_eq!(outer.inner, Some(Box::new(Inner { limit: 10 })));
    }

    #[test]
    fn skipped_fields_are_unknown_keys() {
        let input = values(&[("hidden", &["x"])]);
        let err = from_values::<Outer>(&input).unwrap_err();
        assert_eq!(err, Error::UnknownKey("hidden".to_owned()));
    }

    #[test]
    fn empty_input_never_allocates() {
        let mut target: Option<Outer> = None;
        decode_into(&Values::new(), &mut target).unwrap();
        assert_eq!(target, None);
    }

    #[test]
    fn option_layers_are_allocated_on_demand() {
        let input = values(&[("name", &["ada"])]);
        let mut target: Option<Box<Outer>> = None;
        decode_into(&input, &mut target).unwrap();
        let outer = target.unwrap();
        assert_eq!(outer.name, "ada");
        // embedded records are allocated even when none of their keys appear
        assert_eq!(outer.inner, Some(Box::new(Inner { limit: 0 })));
    }

    #[test]
    fn known_keys_include_absent_ones() {
        let input = values(&[("name", &["ada"])]);
        let mut walker = Walker::new(&input);
        let mut outer = Outer::default();
        outer.walk(&mut walker).unwrap();
        assert!(walker.is_known("name"));
        assert!(walker.is_known("limit"));
        assert!(!walker.is_known("hidden"));
    }

    #[test]
    fn field_errors_carry_the_key() {
        let input = values(&[("limit", &["ten"])]);
        let err = from_values::<Inner>(&input).unwrap_err();
        assert_eq!(err, Error::value("limit", Reason::Integer));
    }

    struct Everything(Vec<String>);

    impl Record for Everything {
        fn walk(&mut self, _walker: &mut Walker<'_>) -> Result<()> {
            Ok(())
        }

        fn decode_values(&mut self, values: &dyn Multimap, _config: &Config) -> Result<()> {
            self.0 = values.keys().map(str::to_owned).collect();
            Ok(())
        }
    }

    #[test]
    fn overridden_records_see_the_whole_multimap() {
        let input = values(&[("a", &["1"]), ("b", &[])]);
        let mut everything = Everything(Vec::new());
        decode_into(&input, &mut everything).unwrap();
        assert_eq!(everything.0, vec!["a".to_owned(), "b".to_owned()]);
    }
}
