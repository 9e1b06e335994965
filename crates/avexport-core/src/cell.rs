// File: crates/avexport-core/src/cell.rs
// Summary: Typed cell values shared by tabular files and table documents.

use crate::format::{format_number, pin_infinite, NumberLocale};

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Dialect text: NaN and `Empty` are blank, infinities use the ±144 placeholders.
    pub fn to_text(&self, locale: NumberLocale) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Integer(i) => i.to_string(),
            Cell::Real(v) => format_number(*v, locale),
            Cell::Text(s) => s.clone(),
        }
    }

    /// Real with infinities pinned; `None` for NaN, which every writer stores as empty/null.
    pub fn real(&self) -> Option<f64> {
        match self {
            Cell::Real(v) if v.is_nan() => None,
            Cell::Real(v) => Some(pin_infinite(*v)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Real(v) => v.is_nan(),
            Cell::Text(s) => s.is_empty(),
            Cell::Integer(_) => false,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Real(v)
    }
}

impl From<u64> for Cell {
    fn from(v: u64) -> Self {
        i64::try_from(v).map(Cell::Integer).unwrap_or(Cell::Real(v as f64))
    }
}

impl From<u32> for Cell {
    fn from(v: u32) -> Self {
        Cell::Integer(v as i64)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Integer(v as i64)
    }
}

impl From<usize> for Cell {
    fn from(v: usize) -> Self {
        Cell::from(v as u64)
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Integer(v as i64)
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

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Cell::Empty, Into::into)
    }
}

/// Build a `Vec<Cell>` from heterogeneous values.
#[macro_export]
macro_rules! cells {
    ($($v:expr),* $(,)?) => {
        vec![$($crate::cell::Cell::from($v)),*]
    };
}
