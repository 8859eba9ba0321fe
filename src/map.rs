//! Map backends for the input multimap.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

#[cfg(feature = "indexmap")]
pub type Map<K, V> = indexmap::IndexMap<K, V>;
#[cfg(not(feature = "indexmap"))]
pub type Map<K, V> = BTreeMap<K, V>;

/// The default multimap: every key maps to the ordered list of values it
/// was given.
pub type Values = Map<String, Vec<String>>;

/// Read access to a parsed query: key to the ordered list of its values.
///
/// Implemented for the common map types so callers can hand over whatever
/// their HTTP layer produced.
pub trait Multimap {
    fn is_empty(&self) -> bool;

    /// All values given for `key`, or `None` if the key is absent.
    fn get_all(&self, key: &str) -> Option<&[String]>;

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

impl<S: BuildHasher> Multimap for HashMap<String, Vec<String>, S> {
    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }

    fn get_all(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(Vec::as_slice)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(HashMap::keys(self).map(String::as_str))
    }
}

impl Multimap for BTreeMap<String, Vec<String>> {
    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }

    fn get_all(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(Vec::as_slice)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(BTreeMap::keys(self).map(String::as_str))
    }
}

#[cfg(feature = "indexmap")]
impl<S: BuildHasher> Multimap for indexmap::IndexMap<String, Vec<String>, S> {
    fn is_empty(&self) -> bool {
        indexmap::IndexMap::is_empty(self)
    }

    fn get_all(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(Vec::as_slice)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(indexmap::IndexMap::keys(self).map(String::as_str))
    }
}

impl<M: Multimap + ?Sized> Multimap for &M {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn get_all(&self, key: &str) -> Option<&[String]> {
        (**self).get_all(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        (**self).keys()
    }
}
