use std::fmt;

/// A value passed to a function in a captured stack frame.
///
/// The variant is chosen when the value is captured, so formatting never has to inspect types at
/// runtime. Objects keep their type name only; their state is never captured.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Absence of a value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer or floating point number.
    Number(Number),
    /// Text value.
    String(String),
    /// Ordered map with integer or string keys. Values may be of mixed kinds.
    Array(Vec<(ArrayKey, Argument)>),
    /// Object, represented by its type name.
    Object {
        /// Declared type of the object.
        type_name: String,
    },
}

impl Argument {
    /// Create an object argument from its type name.
    pub fn object(type_name: impl Into<String>) -> Self {
        Argument::Object {
            type_name: type_name.into(),
        }
    }

    /// Create an array argument from key/value pairs.
    ///
    /// ```
    /// use error_interceptor::Argument;
    ///
    /// let arg = Argument::array([("id", Argument::from(7)), ("name", "x".into())]);
    /// assert_eq!(2, arg.len());
    /// ```
    pub fn array<K, I>(entries: I) -> Self
    where
        K: Into<ArrayKey>,
        I: IntoIterator<Item = (K, Argument)>,
    {
        Argument::Array(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Number of entries for arrays, `0` for every other kind.
    pub fn len(&self) -> usize {
        match self {
            Argument::Array(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Whether this is an array without entries, or not an array at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(n) if n.is_nan() => f.write_str("NAN"),
            Number::Float(n) if n.is_infinite() && n > 0.0 => f.write_str("INF"),
            Number::Float(n) if n.is_infinite() => f.write_str("-INF"),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

/// Key of an array entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    /// Integer key, rendered bare.
    Int(i64),
    /// String key, rendered quoted.
    Str(String),
}

impl From<i64> for ArrayKey {
    fn from(key: i64) -> Self {
        ArrayKey::Int(key)
    }
}

impl From<usize> for ArrayKey {
    fn from(key: usize) -> Self {
        ArrayKey::Int(i64::try_from(key).unwrap_or(i64::MAX))
    }
}

impl From<&str> for ArrayKey {
    fn from(key: &str) -> Self {
        ArrayKey::Str(key.into())
    }
}

impl From<String> for ArrayKey {
    fn from(key: String) -> Self {
        ArrayKey::Str(key)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

impl From<i32> for Argument {
    fn from(value: i32) -> Self {
        Argument::Number(Number::Int(value.into()))
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Number(Number::Int(value))
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Number(Number::Float(value))
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::String(value.into())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::String(value)
    }
}

impl<T: Into<Argument>> From<Option<T>> for Argument {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Argument::Null)
    }
}

impl<T: Into<Argument>> From<Vec<T>> for Argument {
    fn from(values: Vec<T>) -> Self {
        Argument::Array(
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ArrayKey::from(i), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Number::Int(-42), "-42" ; "negative int")]
    #[test_case(Number::Float(1.5), "1.5" ; "float")]
    #[test_case(Number::Float(2.0), "2" ; "whole float")]
    #[test_case(Number::Float(f64::NAN), "NAN" ; "nan")]
    #[test_case(Number::Float(f64::INFINITY), "INF" ; "inf")]
    #[test_case(Number::Float(f64::NEG_INFINITY), "-INF" ; "negative inf")]
    fn number_text(number: Number, expected: &'static str) {
        assert_eq!(expected, number.to_string());
    }

    #[test]
    fn vec_gets_integer_keys() {
        let arg = Argument::from(vec!["a", "b"]);
        assert_eq!(
            Argument::Array(vec![
                (ArrayKey::Int(0), Argument::String("a".into())),
                (ArrayKey::Int(1), Argument::String("b".into())),
            ]),
            arg
        );
    }

    #[test]
    fn none_is_null() {
        assert_eq!(Argument::Null, Argument::from(None::<i64>));
        assert_eq!(Argument::Bool(true), Argument::from(Some(true)));
    }
}
