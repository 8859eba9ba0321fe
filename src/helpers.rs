//! Lists with a delimiter other than a comma.

use std::ops::{Deref, DerefMut};

use crate::de::{Field, Scalar, decode_list, single};
use crate::error::Reason;

/// A list given as one value, split on `DELIM`.
///
/// `Vec<T>` fields already split on commas; use `Delimited` to split on
/// something else. Like `Vec<T>`, an empty value decodes to one element
/// holding the decode of `""`.
///
/// ## Example
///
/// ```
/// use query_values::helpers::PipeDelimited;
/// use query_values::{Record, Values};
///
/// #[derive(Debug, Default, Record)]
/// struct Query {
///     values: PipeDelimited<u8>,
/// }
///
/// let mut values = Values::new();
/// values.insert("values".to_owned(), vec!["1|2|3".to_owned()]);
/// let query: Query = query_values::from_values(&values).unwrap();
/// assert_eq!(*query.values, vec![1, 2, 3]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Delimited<T, const DELIM: char>(pub Vec<T>);

/// Comma-separated values
///
/// Equivalent to `style=form` query parameters in [OpenAPI 3.0](https://swagger.io/docs/specification/v3_0/serialization/#query-parameters)
pub type CommaSeparated<T> = Delimited<T, ','>;

/// Pipe-delimited values
///
/// Equivalent to `style=pipeDelimited` query parameters in [OpenAPI 3.0](https://swagger.io/docs/specification/v3_0/serialization/#query-parameters)
pub type PipeDelimited<T> = Delimited<T, '|'>;

/// Space-delimited values
///
/// Equivalent to `style=spaceDelimited` query parameters in [OpenAPI 3.0](https://swagger.io/docs/specification/v3_0/serialization/#query-parameters).
/// The values are expected to be decoded already, so `+` or `%20` in the
/// raw querystring must have become a space.
pub type SpaceDelimited<T> = Delimited<T, ' '>;

impl<T, const DELIM: char> Delimited<T, DELIM> {
    /// Unwrap into the inner list
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T, const DELIM: char> Deref for Delimited<T, DELIM> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.0
    }
}

impl<T, const DELIM: char> DerefMut for Delimited<T, DELIM> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T, const DELIM: char> From<Vec<T>> for Delimited<T, DELIM> {
    fn from(list: Vec<T>) -> Self {
        Delimited(list)
    }
}

impl<T: Scalar + Default, const DELIM: char> Field for Delimited<T, DELIM> {
    fn decode_field(&mut self, values: &[String]) -> Result<(), Reason> {
        decode_list(&mut self.0, single(values)?, DELIM)
    }
}

impl<T: Scalar + Default, const DELIM: char> Field for Option<Delimited<T, DELIM>> {
    fn decode_field(&mut self, values: &[String]) -> Result<(), Reason> {
        self.get_or_insert_with(Delimited::default)
            .decode_field(values)
    }
}

impl<T: Scalar + Default, const DELIM: char> Field for Box<Delimited<T, DELIM>> {
    fn decode_field(&mut self, values: &[String]) -> Result<(), Reason> {
        (**self).decode_field(values)
    }
}
