//! Order-independent label sets.
//!
//! A `LabelSet` is stored as `(name, value)` pairs sorted by name, so two
//! mappings with the same pairs compare and hash equal no matter how the
//! caller ordered them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::{MetricsError, Result};

/// Canonical label mapping, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelSet(Vec<(String, String)>);

impl LabelSet {
    /// Build from `(name, value)` pairs. A repeated name keeps its last value.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let sorted: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
            .collect();
        Self(sorted.into_iter().collect())
    }

    /// Build from a JSON object. Scalars are stringified; anything that is
    /// not an object is a key-type error.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(MetricsError::KeyType(json_kind(value).into()));
        };

        let mut pairs = Vec::with_capacity(map.len());
        for (name, v) in map {
            let v = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(MetricsError::InvalidLabels(format!(
                        "label {name} has non-scalar value ({})",
                        json_kind(other)
                    )))
                }
            };
            pairs.push((name.as_str(), v));
        }
        Ok(Self::new(pairs))
    }

    /// Returns the value of the label with given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .binary_search_by(|(k, _)| k.as_str().cmp(name))
            .ok()
            .map(|i| self.0[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{k}={v:?}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for LabelSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        LabelSet::from_json(&raw).map_err(de::Error::custom)
    }
}

/// Anything a call site may hand over as a label mapping.
///
/// Conversion is fallible because dynamically typed input (JSON) may not be
/// a mapping at all.
pub trait IntoLabelSet {
    fn into_label_set(self) -> Result<LabelSet>;
}

impl IntoLabelSet for LabelSet {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(self)
    }
}

impl IntoLabelSet for &LabelSet {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(self.clone())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoLabelSet for &[(K, V)] {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(LabelSet::new(self.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))))
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> IntoLabelSet for &[(K, V); N] {
    fn into_label_set(self) -> Result<LabelSet> {
        self.as_slice().into_label_set()
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> IntoLabelSet for [(K, V); N] {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(LabelSet::new(self))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoLabelSet for Vec<(K, V)> {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(LabelSet::new(self))
    }
}

impl<K: AsRef<str>, V: AsRef<str>, S: BuildHasher> IntoLabelSet for HashMap<K, V, S> {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(LabelSet::new(self))
    }
}

impl<K: AsRef<str>, V: AsRef<str>, S: BuildHasher> IntoLabelSet for &HashMap<K, V, S> {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(LabelSet::new(self.iter()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoLabelSet for BTreeMap<K, V> {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(LabelSet::new(self))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoLabelSet for &BTreeMap<K, V> {
    fn into_label_set(self) -> Result<LabelSet> {
        Ok(LabelSet::new(self.iter()))
    }
}

impl IntoLabelSet for &Value {
    fn into_label_set(self) -> Result<LabelSet> {
        LabelSet::from_json(self)
    }
}

impl IntoLabelSet for Value {
    fn into_label_set(self) -> Result<LabelSet> {
        LabelSet::from_json(&self)
    }
}
