//! Parameter sweeps: the source of row keys for flexible tables.
//!
//! A [`ParameterSpace`] enumerates every combination of a set of
//! [`DiscreteDimension`]s. Each configuration becomes one table row, labelled
//! by a [`LabelFunction`].
//!
//! ```
//! use flextab_model::Table;
//! use flextab_sweep::{DiscreteDimension, JoinedLabel, ParameterSpace};
//!
//! let space = ParameterSpace::new()
//!     .with_dimension(&DiscreteDimension::new("model", ["svm", "nb"]))?
//!     .with_dimension(&DiscreteDimension::new("folds", [5, 10]))?;
//!
//! let mut table = Table::new();
//! assert_eq!(space.populate(&mut table, &JoinedLabel::new()), 4);
//! assert_eq!(table.row_ids()[0], "folds=10,model=nb");
//! # Ok::<(), flextab_sweep::SweepError>(())
//! ```

#![deny(unsafe_code)]

mod dimension;
mod error;
mod label;
mod space;

pub use dimension::{Dimension, DiscreteDimension, FixedSizeDimension};
pub use error::{Result, SweepError};
pub use label::{ContextIdLabel, JoinedLabel, LabelFunction, TASK_CONTEXT_ID};
pub use space::{Configuration, Configurations, ParameterSpace};
