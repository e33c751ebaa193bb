//! Cartesian parameter spaces.

use std::collections::BTreeMap;
use std::fmt::Display;

use tracing::debug;

use flextab_model::Table;

use crate::dimension::{Dimension, DiscreteDimension, FixedSizeDimension};
use crate::error::{Result, SweepError};
use crate::label::LabelFunction;

/// One parameter configuration: dimension name to rendered value.
pub type Configuration = BTreeMap<String, String>;

/// The cartesian product of a set of discrete dimensions.
///
/// Configurations are enumerated with the last dimension varying fastest.
/// A space without dimensions holds exactly one, empty, configuration.
#[derive(Debug, Clone, Default)]
pub struct ParameterSpace {
    dimensions: Vec<DiscreteDimension<String>>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension, rendering its values to text.
    ///
    /// Dimension names key the configurations, so a name that is already
    /// present is rejected with [`SweepError::DuplicateDimension`].
    pub fn with_dimension<T: Display>(mut self, dimension: &DiscreteDimension<T>) -> Result<Self> {
        if self.dimensions.iter().any(|d| d.name() == dimension.name()) {
            return Err(SweepError::duplicate(dimension.name()));
        }
        self.dimensions.push(DiscreteDimension::new(
            dimension.name(),
            dimension.values().iter().map(ToString::to_string),
        ));
        Ok(self)
    }

    pub fn dimensions(&self) -> &[DiscreteDimension<String>] {
        &self.dimensions
    }

    /// Number of configurations in the space.
    pub fn size(&self) -> usize {
        self.dimensions.iter().map(FixedSizeDimension::size).product()
    }

    pub fn configurations(&self) -> Configurations {
        Configurations {
            dimensions: self.dimensions.clone(),
            started: false,
            done: false,
        }
    }

    /// Add one row per configuration, labelled by `label`, with the
    /// parameter values as cells. Returns the number of configurations.
    pub fn populate(&self, table: &mut Table<String>, label: &dyn LabelFunction) -> usize {
        let mut count = 0;
        for configuration in self.configurations() {
            let id = label.make_label(&configuration);
            table.add_to_row(id, configuration);
            count += 1;
        }
        debug!(configurations = count, rows = table.row_count(), "populated table from sweep");
        count
    }
}

/// Iterator over the configurations of a [`ParameterSpace`].
#[derive(Debug, Clone)]
pub struct Configurations {
    dimensions: Vec<DiscreteDimension<String>>,
    started: bool,
    done: bool,
}

impl Configurations {
    /// Move the odometer one step. Returns false once every combination was seen.
    fn step(&mut self) -> bool {
        for dimension in self.dimensions.iter_mut().rev() {
            if dimension.has_next() {
                return dimension.advance().is_ok();
            }
            dimension.rewind();
            if dimension.advance().is_err() {
                return false;
            }
        }
        false
    }

    fn snapshot(&self) -> Option<Configuration> {
        self.dimensions
            .iter()
            .map(|d| {
                d.current()
                    .ok()
                    .map(|value| (d.name().to_string(), value.clone()))
            })
            .collect()
    }
}

impl Iterator for Configurations {
    type Item = Configuration;

    fn next(&mut self) -> Option<Configuration> {
        if self.done {
            return None;
        }
        let positioned = if self.started {
            self.step()
        } else {
            self.started = true;
            self.dimensions.iter_mut().all(|d| d.advance().is_ok())
        };
        if !positioned {
            self.done = true;
            return None;
        }
        self.snapshot()
    }
}
