use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::ParameterError;

/// One argument of a raised event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Bool(bool),
    Time(DateTime<Utc>),
    Version(ProductVersion),
    Bag(ParameterBag),
    List(Vec<ParameterBag>),
}

impl ParamValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Text(_) => "text",
            ParamValue::Int(_) => "int",
            ParamValue::Bool(_) => "bool",
            ParamValue::Time(_) => "time",
            ParamValue::Version(_) => "version",
            ParamValue::Bag(_) => "bag",
            ParamValue::List(_) => "list",
        }
    }

    /// Primitives are everything but nested bags and bag sequences
    pub fn is_primitive(&self) -> bool {
        !matches!(self, ParamValue::Bag(_) | ParamValue::List(_))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ParamValue::Text(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Time(v) => write!(f, "{}", v.to_rfc3339()),
            ParamValue::Version(v) => write!(f, "{v}"),
            ParamValue::Bag(v) => write!(f, "{v}"),
            ParamValue::List(v) => {
                write!(f, "[")?;
                for (i, bag) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{bag}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}
impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}
impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}
impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}
impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(v.into())
    }
}
impl From<u16> for ParamValue {
    fn from(v: u16) -> Self {
        ParamValue::Int(v.into())
    }
}
impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}
impl From<DateTime<Utc>> for ParamValue {
    fn from(v: DateTime<Utc>) -> Self {
        ParamValue::Time(v)
    }
}
impl From<ProductVersion> for ParamValue {
    fn from(v: ProductVersion) -> Self {
        ParamValue::Version(v)
    }
}
impl From<ParameterBag> for ParamValue {
    fn from(v: ParameterBag) -> Self {
        ParamValue::Bag(v)
    }
}
impl From<Vec<ParameterBag>> for ParamValue {
    fn from(v: Vec<ParameterBag>) -> Self {
        ParamValue::List(v)
    }
}

/// Named arguments of one raised event, possibly nested.
///
/// Once handed to the coordinator a bag is shared read-only between every
/// caller of the same logical event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterBag(HashMap<String, ParamValue>);

impl ParameterBag {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builder-style insert
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(
        &self,
        key: &str,
    ) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn require(
        &self,
        key: &str,
    ) -> Result<&ParamValue, ParameterError> {
        self.0.get(key).ok_or_else(|| ParameterError::Missing {
            key: key.to_string(),
        })
    }

    pub fn text(
        &self,
        key: &str,
    ) -> Result<&str, ParameterError> {
        match self.require(key)? {
            ParamValue::Text(v) => Ok(v),
            other => Err(mismatch(key, "text", other)),
        }
    }

    pub fn int(
        &self,
        key: &str,
    ) -> Result<i64, ParameterError> {
        match self.require(key)? {
            ParamValue::Int(v) => Ok(*v),
            other => Err(mismatch(key, "int", other)),
        }
    }

    /// Integer narrowed to `i32`, the width of every SDK code
    pub fn code(
        &self,
        key: &str,
    ) -> Result<i32, ParameterError> {
        let value = self.int(key)?;
        i32::try_from(value).map_err(|_| ParameterError::OutOfRange {
            key: key.to_string(),
            value,
        })
    }

    pub fn flag(
        &self,
        key: &str,
    ) -> Result<bool, ParameterError> {
        match self.require(key)? {
            ParamValue::Bool(v) => Ok(*v),
            other => Err(mismatch(key, "bool", other)),
        }
    }

    pub fn time(
        &self,
        key: &str,
    ) -> Result<DateTime<Utc>, ParameterError> {
        match self.require(key)? {
            ParamValue::Time(v) => Ok(*v),
            other => Err(mismatch(key, "time", other)),
        }
    }

    pub fn version(
        &self,
        key: &str,
    ) -> Result<&ProductVersion, ParameterError> {
        match self.require(key)? {
            ParamValue::Version(v) => Ok(v),
            other => Err(mismatch(key, "version", other)),
        }
    }

    pub fn bag(
        &self,
        key: &str,
    ) -> Result<&ParameterBag, ParameterError> {
        match self.require(key)? {
            ParamValue::Bag(v) => Ok(v),
            other => Err(mismatch(key, "bag", other)),
        }
    }

    pub fn list(
        &self,
        key: &str,
    ) -> Result<&[ParameterBag], ParameterError> {
        match self.require(key)? {
            ParamValue::List(v) => Ok(v),
            other => Err(mismatch(key, "list", other)),
        }
    }
}

impl fmt::Display for ParameterBag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut keys: Vec<&String> = self.0.keys().collect();
        keys.sort();
        write!(f, "{{")?;
        for (i, key) in keys.into_iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} - {}", key, self.0[key])?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterBag {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn mismatch(
    key: &str,
    expected: &'static str,
    found: &ParamValue,
) -> ParameterError {
    ParameterError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind_name(),
    }
}

/// Dotted driver/runtime version, `major.minor[.build[.revision]]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductVersion {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl ProductVersion {
    pub fn new(
        major: u32,
        minor: u32,
    ) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    pub fn with_build(
        mut self,
        build: u32,
    ) -> Self {
        self.build = Some(build);
        self
    }

    pub fn with_revision(
        mut self,
        revision: u32,
    ) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
            if let Some(revision) = self.revision {
                write!(f, ".{revision}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for ProductVersion {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParameterError::TypeMismatch {
            key: s.to_string(),
            expected: "version",
            found: "text",
        };
        let parts = s
            .trim()
            .split('.')
            .map(|p| p.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<u32>, _>>()?;
        match parts.as_slice() {
            [major, minor] => Ok(ProductVersion::new(*major, *minor)),
            [major, minor, build] => Ok(ProductVersion::new(*major, *minor).with_build(*build)),
            [major, minor, build, revision] => Ok(ProductVersion::new(*major, *minor)
                .with_build(*build)
                .with_revision(*revision)),
            _ => Err(invalid()),
        }
    }
}
