use std::time::Duration;

use uuid::Uuid;

use super::duration;
use crate::error::Reason;

/// A field decoded from every value given for its key.
///
/// Every [`Scalar`] is a `Field`. Implement `Field` directly to take the raw
/// value list of a key, e.g. to accept a repeated key:
///
/// ```
/// use query_values::{Field, Reason, Record};
///
/// #[derive(Debug, Default)]
/// struct Ids(Vec<u64>);
///
/// impl Field for Ids {
///     fn decode_field(&mut self, values: &[String]) -> Result<(), Reason> {
///         self.0 = values
///             .iter()
///             .map(|v| v.parse::<u64>().map_err(Reason::custom))
///             .collect::<Result<_, _>>()?;
///         Ok(())
///     }
/// }
///
/// #[derive(Debug, Default, Record)]
/// struct Query {
///     id: Ids,
/// }
///
/// let mut values = query_values::Values::new();
/// values.insert("id".to_owned(), vec!["1".to_owned(), "2".to_owned()]);
/// let query: Query = query_values::from_values(&values).unwrap();
/// assert_eq!(query.id.0, vec![1, 2]);
/// ```
///
/// The walker attaches the key to any returned [`Reason`].
pub trait Field {
    fn decode_field(&mut self, values: &[String]) -> Result<(), Reason>;
}

/// A value decoded from a single string.
///
/// Implemented for strings, characters, integers, `bool`, [`Duration`] and
/// [`Uuid`]. Implement it for your own types to control how they are parsed;
/// they can then be used as fields and as elements of lists.
pub trait Scalar {
    fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason>;

    /// Decode from all values given for the key. Exactly one value is
    /// required unless a type says otherwise.
    fn decode_values(&mut self, values: &[String]) -> Result<(), Reason> {
        self.decode_scalar(single(values)?)
    }
}

impl<T: Scalar + ?Sized> Field for T {
    fn decode_field(&mut self, values: &[String]) -> Result<(), Reason> {
        self.decode_values(values)
    }
}

pub(crate) fn single(values: &[String]) -> Result<&str, Reason> {
    match values {
        [] => Err(Reason::MissingValue),
        [value] => Ok(value.as_str()),
        _ => Err(Reason::MultipleValues),
    }
}

/// Clears `list` and refills it with the scalars of `raw`, split on
/// `delimiter`.
///
/// Delimiters cannot be escaped. An empty `raw` is one empty element, not an
/// empty list.
pub(crate) fn decode_list<T>(list: &mut Vec<T>, raw: &str, delimiter: char) -> Result<(), Reason>
where
    T: Scalar + Default,
{
    list.clear();
    for (index, element) in raw.split(delimiter).enumerate() {
        let mut value = T::default();
        value
            .decode_scalar(element)
            .map_err(|reason| Reason::element(index, reason))?;
        list.push(value);
    }
    Ok(())
}

impl<T: Scalar + Default> Field for Vec<T> {
    fn decode_field(&mut self, values: &[String]) -> Result<(), Reason> {
        decode_list(self, single(values)?, ',')
    }
}

/// `None` until the key is given.
impl<T: Scalar + Default> Field for Option<Vec<T>> {
    fn decode_field(&mut self, values: &[String]) -> Result<(), Reason> {
        self.get_or_insert_with(Vec::new).decode_field(values)
    }
}

impl<T: Scalar + Default> Field for Box<Vec<T>> {
    fn decode_field(&mut self, values: &[String]) -> Result<(), Reason> {
        (**self).decode_field(values)
    }
}

impl Scalar for String {
    fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason> {
        self.clear();
        self.push_str(raw);
        Ok(())
    }
}

impl Scalar for char {
    fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(Reason::Character),
        }
    }
}

macro_rules! integer_scalar {
    ($($ty:ident)*) => {
        $(
            impl Scalar for $ty {
                fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason> {
                    *self = raw.parse::<$ty>().map_err(|_| Reason::Integer)?;
                    Ok(())
                }
            }
        )*
    };
}

integer_scalar!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

/// Booleans are flags: the key is given once, with no value.
impl Scalar for bool {
    fn decode_scalar(&mut self, _raw: &str) -> Result<(), Reason> {
        *self = true;
        Ok(())
    }

    fn decode_values(&mut self, values: &[String]) -> Result<(), Reason> {
        match values {
            [flag] if flag.is_empty() => self.decode_scalar(flag),
            _ => Err(Reason::BooleanWithValue),
        }
    }
}

impl Scalar for Duration {
    fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason> {
        *self = duration::parse(raw).ok_or(Reason::Duration)?;
        Ok(())
    }
}

impl Scalar for Uuid {
    fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason> {
        *self = Uuid::parse_str(raw).map_err(|_| Reason::Uuid)?;
        Ok(())
    }
}

impl<T: Scalar + Default> Scalar for Option<T> {
    fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason> {
        self.get_or_insert_with(T::default).decode_scalar(raw)
    }

    fn decode_values(&mut self, values: &[String]) -> Result<(), Reason> {
        self.get_or_insert_with(T::default).decode_values(values)
    }
}

impl<T: Scalar + ?Sized> Scalar for Box<T> {
    fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason> {
        (**self).decode_scalar(raw)
    }

    fn decode_values(&mut self, values: &[String]) -> Result<(), Reason> {
        (**self).decode_values(values)
    }
}
