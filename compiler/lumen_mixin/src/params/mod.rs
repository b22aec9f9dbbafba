//! Typed parameter keys and values.
//!
//! A [`ParamKey<T>`] is a process-unique name paired with a value type.
//! Keys are declared through a [`ParamKeys`] table, which rejects a second
//! declaration of the same name with a different type. Values are stored
//! untyped as [`ParamValue`] and converted back on typed reads; an unbound
//! key reads as [`ParamValue::Unset`], which typed reads turn into the
//! value type's default.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Value type of a parameter key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKind {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Mixin,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::UInt => "uint",
            ParamKind::Float => "float",
            ParamKind::Str => "string",
            ParamKind::Mixin => "mixin",
        }
    }

    /// Parse command-line text as a value of this kind.
    ///
    /// Booleans accept `true`/`false`/`1`/`0`; strings and mixin names take
    /// the text verbatim.
    pub fn parse_value(self, text: &str) -> Option<ParamValue> {
        let text = text.trim();
        match self {
            ParamKind::Bool => match text {
                "true" | "1" => Some(ParamValue::Bool(true)),
                "false" | "0" => Some(ParamValue::Bool(false)),
                _ => None,
            },
            ParamKind::Int => text.parse().ok().map(ParamValue::Int),
            ParamKind::UInt => text.trim_end_matches('u').parse().ok().map(ParamValue::UInt),
            ParamKind::Float => text.parse().ok().map(ParamValue::Float),
            ParamKind::Str => Some(ParamValue::Str(text.to_owned())),
            ParamKind::Mixin if text.is_empty() => None,
            ParamKind::Mixin => Some(ParamValue::Mixin(text.to_owned())),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An untyped parameter value.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// Declared but never bound.
    #[default]
    Unset,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Name of a registered mixin.
    Mixin(String),
}

impl ParamValue {
    /// `None` for [`ParamValue::Unset`].
    pub fn kind(&self) -> Option<ParamKind> {
        Some(match self {
            ParamValue::Unset => return None,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::UInt(_) => ParamKind::UInt,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Str(_) => ParamKind::Str,
            ParamValue::Mixin(_) => ParamKind::Mixin,
        })
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, ParamValue::Unset)
    }

    /// The mixin this value names. Strings are accepted as mixin names.
    pub fn mixin_name(&self) -> Option<&str> {
        match self {
            ParamValue::Mixin(name) | ParamValue::Str(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Unset => f.write_str("<unset>"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::UInt(v) => write!(f, "{v}u"),
            ParamValue::Float(v) => write!(f, "{v:?}"),
            ParamValue::Str(v) => write!(f, "{v:?}"),
            ParamValue::Mixin(name) => f.write_str(name),
        }
    }
}

/// Name of a mixin, as a typed parameter value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MixinName(pub String);

impl MixinName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MixinName {
    fn from(name: &str) -> Self {
        MixinName(name.to_owned())
    }
}

impl fmt::Display for MixinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Rust type usable as a parameter value.
pub trait ParamType: Sized + Default {
    const KIND: ParamKind;

    /// `None` if `value` holds a different kind or is unset.
    fn from_value(value: &ParamValue) -> Option<Self>;

    fn into_value(self) -> ParamValue;
}

macro_rules! impl_param_type {
    ($ty:ty, $kind:ident) => {
        impl ParamType for $ty {
            const KIND: ParamKind = ParamKind::$kind;

            #[allow(clippy::clone_on_copy, reason = "shared by Copy and String values")]
            fn from_value(value: &ParamValue) -> Option<Self> {
                match value {
                    ParamValue::$kind(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_value(self) -> ParamValue {
                ParamValue::$kind(self)
            }
        }
    };
}

impl_param_type!(bool, Bool);
impl_param_type!(i64, Int);
impl_param_type!(u64, UInt);
impl_param_type!(f64, Float);
impl_param_type!(String, Str);

impl ParamType for MixinName {
    const KIND: ParamKind = ParamKind::Mixin;

    fn from_value(value: &ParamValue) -> Option<Self> {
        value.mixin_name().map(MixinName::from)
    }

    fn into_value(self) -> ParamValue {
        ParamValue::Mixin(self.0)
    }
}

/// Untyped identity of a declared key. Cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamKeyId {
    name: Arc<str>,
    kind: ParamKind,
}

impl ParamKeyId {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }
}

impl fmt::Display for ParamKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)
    }
}

/// A declared parameter key with value type `T`.
pub struct ParamKey<T> {
    id: ParamKeyId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ParamKey<T> {
    pub fn id(&self) -> &ParamKeyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }
}

impl<T> Clone for ParamKey<T> {
    fn clone(&self) -> Self {
        ParamKey {
            id: self.id.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for ParamKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ParamKey<T> {}

impl<T> fmt::Debug for ParamKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParamKey").field(&self.id).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamKeyError {
    /// The name is already declared with another value type.
    #[error("parameter `{name}` is declared as {declared}, not {requested}")]
    TypeConflict {
        name: String,
        declared: ParamKind,
        requested: ParamKind,
    },
}

/// Table of declared parameter keys.
///
/// Declarations may happen lazily from any thread, so the table sits
/// behind a mutex. Reads during a compile go through the keys themselves
/// and never touch the table.
#[derive(Debug, Default)]
pub struct ParamKeys {
    keys: Mutex<FxHashMap<Arc<str>, ParamKind>>,
}

impl ParamKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide key table.
    pub fn global() -> &'static ParamKeys {
        static GLOBAL: OnceLock<ParamKeys> = OnceLock::new();
        GLOBAL.get_or_init(ParamKeys::new)
    }

    /// Declare `name` with value type `T`. Redeclaring with the same type
    /// returns an equal key.
    pub fn declare<T: ParamType>(&self, name: &str) -> Result<ParamKey<T>, ParamKeyError> {
        let id = self.declare_kind(name, T::KIND)?;
        Ok(ParamKey {
            id,
            _marker: PhantomData,
        })
    }

    /// Untyped form of [`ParamKeys::declare`].
    pub fn declare_kind(&self, name: &str, kind: ParamKind) -> Result<ParamKeyId, ParamKeyError> {
        let mut keys = self.keys.lock();
        if let Some((existing, &declared)) = keys.get_key_value(name) {
            if declared != kind {
                return Err(ParamKeyError::TypeConflict {
                    name: name.to_owned(),
                    declared,
                    requested: kind,
                });
            }
            return Ok(ParamKeyId {
                name: Arc::clone(existing),
                kind,
            });
        }

        let name: Arc<str> = Arc::from(name);
        keys.insert(Arc::clone(&name), kind);
        Ok(ParamKeyId { name, kind })
    }

    pub fn lookup(&self, name: &str) -> Option<ParamKeyId> {
        let keys = self.keys.lock();
        keys.get_key_value(name).map(|(name, &kind)| ParamKeyId {
            name: Arc::clone(name),
            kind,
        })
    }

    /// Declared names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.keys.lock().keys().map(|n| n.to_string()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

/// One scope of parameter bindings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters {
    values: FxHashMap<ParamKeyId, ParamValue>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Parameters::set`].
    #[must_use]
    pub fn with<T: ParamType>(mut self, key: &ParamKey<T>, value: T) -> Self {
        self.set(key, value);
        self
    }

    pub fn set<T: ParamType>(&mut self, key: &ParamKey<T>, value: T) {
        self.values.insert(key.id.clone(), value.into_value());
    }

    /// Bind an untyped value. Binding [`ParamValue::Unset`] shadows outer
    /// scopes with the unset value.
    pub fn set_value(&mut self, key: ParamKeyId, value: ParamValue) {
        self.values.insert(key, value);
    }

    pub fn get<T: ParamType>(&self, key: &ParamKey<T>) -> Option<T> {
        self.values.get(&key.id).and_then(T::from_value)
    }

    pub fn get_value(&self, key: &ParamKeyId) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKeyId, &ParamValue)> {
        self.values.iter()
    }

    /// Bindings as `(name, value)`, sorted by name.
    pub fn to_sorted_vec(&self) -> Vec<(String, ParamValue)> {
        let mut bound: Vec<(String, ParamValue)> = self
            .values
            .iter()
            .map(|(key, value)| (key.name().to_owned(), value.clone()))
            .collect();
        bound.sort_by(|a, b| a.0.cmp(&b.0));
        bound
    }
}

impl FromIterator<(ParamKeyId, ParamValue)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (ParamKeyId, ParamValue)>>(iter: I) -> Self {
        Parameters {
            values: iter.into_iter().collect(),
        }
    }
}
