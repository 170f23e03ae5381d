use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A single value in a results table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    FloatList(Vec<f64>),
    TextList(Vec<String>),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
            Cell::FloatList(values) => write_list(f, values),
            Cell::TextList(values) => write_list(f, values),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", v)?;
    }
    f.write_str("]")
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<u32> for Cell {
    fn from(v: u32) -> Self {
        Cell::Int(i64::from(v))
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl From<Vec<f64>> for Cell {
    fn from(v: Vec<f64>) -> Self {
        Cell::FloatList(v)
    }
}

impl From<Vec<String>> for Cell {
    fn from(v: Vec<String>) -> Self {
        Cell::TextList(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Cell::Int(3).to_string(), "3");
        assert_eq!(Cell::Float(0.5).to_string(), "0.5");
        assert_eq!(Cell::from("RVO").to_string(), "RVO");
        assert_eq!(Cell::FloatList(vec![1.5, -2.0]).to_string(), "[1.5, -2]");
        assert_eq!(
            Cell::from(vec!["a".to_string(), "b".to_string()]).to_string(),
            "[a, b]"
        );
        assert_eq!(Cell::FloatList(vec![]).to_string(), "[]");
    }

    #[test]
    fn numeric_access() {
        assert_eq!(Cell::Int(2).as_f64(), Some(2.0));
        assert_eq!(Cell::from(0.25).as_f64(), Some(0.25));
        assert_eq!(Cell::from("x").as_f64(), None);
        assert_eq!(Cell::from("x").as_str(), Some("x"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&Cell::FloatList(vec![1.0, 2.5])).unwrap();
        assert_eq!(json, "[1.0,2.5]");
        assert_eq!(serde_json::to_string(&Cell::from("x")).unwrap(), "\"x\"");
    }
}
