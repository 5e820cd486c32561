use serde::Serialize;

use crate::error::CoreResult;

/// Printable tree of nested values.
///
/// Every node is one of four shapes, so the printer has no catch-all
/// "stringify anything" branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `label = inner`; the label decorates the child, it does not add a level.
    Pair(String, Box<Value>),
    /// Present or absent value; unwrapping is transparent.
    Optional(Option<Box<Value>>),
    /// Ordered sequence, rendered as a `{ ... }` block.
    Collection(Vec<Value>),
    /// Leaf already rendered to text.
    Scalar(String),
}

impl Value {
    pub fn pair(label: impl Into<String>, inner: impl Into<Value>) -> Self {
        Value::Pair(label.into(), Box::new(inner.into()))
    }

    pub fn some(inner: impl Into<Value>) -> Self {
        Value::Optional(Some(Box::new(inner.into())))
    }

    pub fn none() -> Self {
        Value::Optional(None)
    }

    pub fn scalar(text: impl ToString) -> Self {
        Value::Scalar(text.to_string())
    }

    pub fn collection<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Collection(items.into_iter().map(Into::into).collect())
    }

    /// Builds a tree from any serializable value.
    ///
    /// Structs and maps become collections of pairs (in key order), sequences
    /// become collections, `None`/unit become absent optionals, and strings,
    /// numbers and booleans become scalars.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> CoreResult<Self> {
        Ok(serde_json::to_value(value)?.into())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::none(),
            Json::Bool(b) => Value::scalar(b),
            Json::Number(n) => Value::scalar(n),
            Json::String(s) => Value::Scalar(s),
            Json::Array(items) => Value::collection(items),
            Json::Object(map) => Value::Collection(
                map.into_iter()
                    .map(|(key, inner)| Value::pair(key, inner))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

macro_rules! scalar_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::scalar(v)
                }
            }
        )*
    };
}

scalar_from!(bool, char, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        Value::Optional(opt.map(|v| Box::new(v.into())))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::collection(items)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Value {
    fn from((label, inner): (K, V)) -> Self {
        Value::pair(label, inner)
    }
}
