//! Parameter dimensions.

use std::fmt;

use crate::error::{Result, SweepError};

/// A named cursor over the values of one experiment parameter.
pub trait Dimension {
    type Value;

    fn name(&self) -> &str;

    /// Whether [`Dimension::advance`] would move to another value.
    fn has_next(&self) -> bool;

    /// Move to the next value and return it.
    fn advance(&mut self) -> Result<&Self::Value>;

    /// The value the cursor is positioned on.
    ///
    /// Fails for an empty dimension, before the first `advance`, and after the
    /// cursor moved past the last value.
    fn current(&self) -> Result<&Self::Value>;

    /// Reset the cursor to before the first value.
    fn rewind(&mut self);
}

/// A dimension whose number of values is known up front.
pub trait FixedSizeDimension: Dimension {
    fn size(&self) -> usize;
}

/// A dimension over a fixed list of values.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDimension<T> {
    name: String,
    values: Vec<T>,
    position: Option<usize>,
}

impl<T> DiscreteDimension<T> {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().collect(),
            position: None,
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Dimension for DiscreteDimension<T> {
    type Value = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn has_next(&self) -> bool {
        self.position.map_or(0, |p| p + 1) < self.values.len()
    }

    fn advance(&mut self) -> Result<&T> {
        if self.values.is_empty() {
            return Err(SweepError::empty(&self.name));
        }
        let next = self.position.map_or(0, |p| p + 1).min(self.values.len());
        self.position = Some(next);
        self.current()
    }

    fn current(&self) -> Result<&T> {
        if self.values.is_empty() {
            return Err(SweepError::empty(&self.name));
        }
        match self.position {
            None => Err(SweepError::not_started(&self.name)),
            Some(p) => self
                .values
                .get(p)
                .ok_or_else(|| SweepError::exhausted(&self.name)),
        }
    }

    fn rewind(&mut self) {
        self.position = None;
    }
}

impl<T> FixedSizeDimension for DiscreteDimension<T> {
    fn size(&self) -> usize {
        self.values.len()
    }
}

impl<T: fmt::Display> fmt::Display for DiscreteDimension<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current() {
            Ok(value) => write!(f, "[{}: {}]", self.name, value),
            Err(_) => write!(f, "[{}: ?]", self.name),
        }
    }
}
