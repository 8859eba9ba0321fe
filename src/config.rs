use crate::de::{Target, decode_with};
use crate::error::Result;
use crate::map::Multimap;

/// Configuration for decoding behavior.
///
/// ## Strictness
///
/// By default every key in the input must be consumed by some field of the
/// record, and a key that is not fails the decode with
/// [`Error::UnknownKey`](crate::Error::UnknownKey). This rejects typos and
/// unexpected parameters.
///
/// Services that receive parameters they do not own (cache busters,
/// tracking parameters) can turn this off; unknown keys are then logged at
/// `debug` level and skipped.
///
/// Default value: `strict = true`
///
/// ```
/// use query_values::{Config, Record, Values};
///
/// #[derive(Debug, Default, PartialEq, Record)]
/// struct Query {
///     name: String,
/// }
///
/// let mut values = Values::new();
/// values.insert("name".to_owned(), vec!["ada".to_owned()]);
/// values.insert("_".to_owned(), vec!["1700000000".to_owned()]);
///
/// assert!(query_values::from_values::<Query>(&values).is_err());
///
/// let config = Config::new().strict(false);
/// let query: Query = config.from_values(&values).unwrap();
/// assert_eq!(query.name, "ada");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self { strict: true }
    }

    /// Whether keys that no field consumes fail the decode. Default is
    /// `true`.
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Decodes `values` into `target` in place using this `Config`.
    pub fn decode_into<T>(self, values: &impl Multimap, target: &mut T) -> Result<()>
    where
        T: Target + ?Sized,
    {
        decode_with(&self, values, target)
    }

    /// Decodes `values` into a fresh `T::default()` using this `Config`.
    pub fn from_values<T>(self, values: &impl Multimap) -> Result<T>
    where
        T: Target + Default,
    {
        let mut target = T::default();
        self.decode_into(values, &mut target)?;
        Ok(target)
    }
}
