use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current value of one field, shaped by the field's kind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    /// Checkbox answers: option value to checked flag.
    Choices(BTreeMap<String, bool>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(value) => Some(value),
            AnswerValue::Choices(_) => None,
        }
    }

    pub fn choices(&self) -> Option<&BTreeMap<String, bool>> {
        match self {
            AnswerValue::Text(_) => None,
            AnswerValue::Choices(choices) => Some(choices),
        }
    }

    pub fn is_checked(&self, option: &str) -> bool {
        self.choices()
            .and_then(|choices| choices.get(option))
            .copied()
            .unwrap_or(false)
    }

    pub fn checked_options(&self) -> impl Iterator<Item = &str> {
        self.choices()
            .into_iter()
            .flat_map(|choices| choices.iter())
            .filter_map(|(option, checked)| checked.then_some(option.as_str()))
    }

    /// Whether the value satisfies a `required` field: a non-empty string, or
    /// a choice map with at least one option checked.
    pub fn is_answered(&self) -> bool {
        match self {
            AnswerValue::Text(value) => !value.is_empty(),
            AnswerValue::Choices(choices) => choices.values().any(|checked| *checked),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_owned())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

pub type AnswerState = BTreeMap<String, AnswerValue>;

/// Field id to message; an empty message means the field has no error.
pub type ErrorState = BTreeMap<String, String>;

/// Raw edit reported by the rendering layer for one field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldInput {
    Text(String),
    Toggle { option: String, checked: bool },
}

impl FieldInput {
    pub fn text(value: impl Into<String>) -> Self {
        FieldInput::Text(value.into())
    }

    pub fn toggle(option: impl Into<String>, checked: bool) -> Self {
        FieldInput::Toggle {
            option: option.into(),
            checked,
        }
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Text(value.to_owned())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::Text(value)
    }
}
