//! Decoding values through their `serde::Deserialize` implementation.
//!
//! A single query value is offered to the type as a string, or as the
//! primitive it asks for if the string parses as one. Types that ask for a
//! sequence, map, struct or tuple cannot be built from one string and are
//! rejected as unsupported.

use std::any::type_name;
use std::ops::{Deref, DerefMut};

use serde::de::{self, DeserializeOwned, Unexpected};

use super::field::Scalar;
use crate::error::Reason;

/// Decodes `T` from one value with its `serde::Deserialize` implementation.
///
/// Use it for types that already know how to read themselves from a string,
/// such as timestamps or unit-only enums:
///
/// ```
/// use query_values::{Record, Text, Values};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize)]
/// #[serde(rename_all = "lowercase")]
/// enum Order {
///     #[default]
///     Asc,
///     Desc,
/// }
///
/// #[derive(Debug, Default, Record)]
/// struct Query {
///     order: Text<Order>,
/// }
///
/// let mut values = Values::new();
/// values.insert("order".to_owned(), vec!["desc".to_owned()]);
/// let query: Query = query_values::from_values(&values).unwrap();
/// assert_eq!(*query.order, Order::Desc);
/// ```
///
/// The `#[query(text)]` field attribute does the same without the wrapper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text<T>(pub T);

impl<T> Text<T> {
    /// Unwrap into inner T value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Text<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Text<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DeserializeOwned> Scalar for Text<T> {
    fn decode_scalar(&mut self, raw: &str) -> Result<(), Reason> {
        self.0 = from_text(raw)?;
        Ok(())
    }
}

pub(crate) fn from_text<T: DeserializeOwned>(raw: &str) -> Result<T, Reason> {
    T::deserialize(TextDeserializer {
        value: raw,
        type_name: type_name::<T>(),
    })
}

struct TextDeserializer<'de> {
    value: &'de str,
    type_name: &'static str,
}

impl TextDeserializer<'_> {
    fn unsupported<T>(&self) -> Result<T, Reason> {
        Err(Reason::Unsupported(self.type_name.to_owned()))
    }
}

macro_rules! deserialize_parsed {
    ($ty:ident, $method:ident, $visit_method:ident, $reason:expr) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value, Self::Error>
        where
            V: de::Visitor<'de>,
        {
            match self.value.parse::<$ty>() {
                Ok(val) => visitor.$visit_method(val),
                Err(_) => Err($reason),
            }
        }
    };
}

impl<'de> de::Deserializer<'de> for TextDeserializer<'de> {
    type Error = Reason;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        let mut chars = self.value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Reason::Character),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.unsupported()
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.unsupported()
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.unsupported()
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.unsupported()
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.unsupported()
    }

    deserialize_parsed!(bool, deserialize_bool, visit_bool, Reason::Boolean);
    deserialize_parsed!(i8, deserialize_i8, visit_i8, Reason::Integer);
    deserialize_parsed!(i16, deserialize_i16, visit_i16, Reason::Integer);
    deserialize_parsed!(i32, deserialize_i32, visit_i32, Reason::Integer);
    deserialize_parsed!(i64, deserialize_i64, visit_i64, Reason::Integer);
    deserialize_parsed!(i128, deserialize_i128, visit_i128, Reason::Integer);
    deserialize_parsed!(u8, deserialize_u8, visit_u8, Reason::Integer);
    deserialize_parsed!(u16, deserialize_u16, visit_u16, Reason::Integer);
    deserialize_parsed!(u32, deserialize_u32, visit_u32, Reason::Integer);
    deserialize_parsed!(u64, deserialize_u64, visit_u64, Reason::Integer);
    deserialize_parsed!(u128, deserialize_u128, visit_u128, Reason::Integer);
    deserialize_parsed!(f32, deserialize_f32, visit_f32, Reason::Number);
    deserialize_parsed!(f64, deserialize_f64, visit_f64, Reason::Number);

    serde::forward_to_deserialize_any! {
        str string bytes byte_buf unit unit_struct identifier ignored_any
    }
}

impl<'de> de::EnumAccess<'de> for TextDeserializer<'de> {
    type Error = Reason;
    type Variant = UnitOnly;

    fn variant_seed<T>(self, seed: T) -> Result<(T::Value, Self::Variant), Self::Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self).map(|variant| (variant, UnitOnly))
    }
}

/// Only unit variants can be named by a single string.
struct UnitOnly;

impl<'de> de::VariantAccess<'de> for UnitOnly {
    type Error = Reason;

    fn unit_variant(self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, _seed: T) -> Result<T::Value, Self::Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        Err(de::Error::invalid_type(
            Unexpected::UnitVariant,
            &"newtype variant",
        ))
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        Err(de::Error::invalid_type(
            Unexpected::UnitVariant,
            &"tuple variant",
        ))
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        Err(de::Error::invalid_type(
            Unexpected::UnitVariant,
            &"struct variant",
        ))
    }
}
