//! Row labels for parameter configurations.

use std::collections::BTreeMap;

/// Reserved property carrying the id of the task context that produced a result.
pub const TASK_CONTEXT_ID: &str = "__TASK_CONTEXT_ID__";

/// Generates a salient label (a row id) for a parameter configuration.
pub trait LabelFunction {
    fn make_label(&self, properties: &BTreeMap<String, String>) -> String;
}

/// Joins `key=value` pairs in key order.
#[derive(Debug, Clone)]
pub struct JoinedLabel {
    separator: String,
    keys: Option<Vec<String>>,
}

impl Default for JoinedLabel {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            keys: None,
        }
    }
}

impl JoinedLabel {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Only include the given keys, in the given order.
    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }
}

impl LabelFunction for JoinedLabel {
    fn make_label(&self, properties: &BTreeMap<String, String>) -> String {
        let pairs: Vec<String> = match &self.keys {
            Some(keys) => keys
                .iter()
                .filter_map(|k| properties.get(k).map(|v| format!("{k}={v}")))
                .collect(),
            None => properties
                .iter()
                .filter(|(k, _)| k.as_str() != TASK_CONTEXT_ID)
                .map(|(k, v)| format!("{k}={v}"))
                .collect(),
        };
        pairs.join(&self.separator)
    }
}

/// Uses the task context id when present, otherwise the joined parameters.
#[derive(Debug, Clone, Default)]
pub struct ContextIdLabel;

impl LabelFunction for ContextIdLabel {
    fn make_label(&self, properties: &BTreeMap<String, String>) -> String {
        match properties.get(TASK_CONTEXT_ID) {
            Some(id) => id.clone(),
            None => JoinedLabel::default().make_label(properties),
        }
    }
}
