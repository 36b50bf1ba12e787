use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input control a field renders as. Each kind decides the answer shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Date,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Textarea => "textarea",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::Date => "date",
        }
    }

    /// Kinds that pick from a fixed option list.
    pub const fn needs_options(self) -> bool {
        matches!(
            self,
            FieldKind::Select | FieldKind::Checkbox | FieldKind::Radio
        )
    }

    /// Checkbox answers are option maps; every other kind holds one string.
    pub const fn is_multi_select(self) -> bool {
        matches!(self, FieldKind::Checkbox)
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Pattern check for a text answer. A rule without a pattern checks nothing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            message: None,
        }
    }

    pub fn message(mut self, value: impl Into<String>) -> Self {
        self.message = Some(value.into());
        self
    }
}

/// Declarative description of one input control.
///
/// Deserializes from the block JSON the page builder stores, where the kind is
/// spelled `type`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            required: false,
            options: Vec::new(),
            validation: None,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Text, label)
    }

    pub fn email(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Email, label)
    }

    pub fn checkbox(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Checkbox, label)
    }

    pub fn required(mut self, value: bool) -> Self {
        self.required = value;
        self
    }

    pub fn option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(FieldOption::new(label, value));
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }

    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        self.validation(ValidationRule::new(pattern))
    }
}

/// Types that describe a form schema statically, usually via
/// `#[derive(FormSchema)]`.
pub trait FormSchema {
    fn schema() -> Vec<FieldSpec>;
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("duplicate field id '{0}'")]
    DuplicateFieldId(String),
    #[error("field '{id}' of kind {kind} needs at least one option")]
    MissingOptions { id: String, kind: FieldKind },
    #[error("invalid validation pattern for field '{id}': {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to parse form schema: {0}")]
    Json(#[from] serde_json::Error),
}

pub(super) struct CompiledField {
    pub(super) spec: FieldSpec,
    pub(super) pattern: Option<Regex>,
}

impl CompiledField {
    pub(super) fn id(&self) -> &str {
        &self.spec.id
    }
}

pub(super) fn compile_schema(fields: Vec<FieldSpec>) -> Result<Vec<CompiledField>, SchemaError> {
    let mut seen = BTreeSet::new();
    let mut compiled = Vec::with_capacity(fields.len());
    for spec in fields {
        if !seen.insert(spec.id.clone()) {
            return Err(SchemaError::DuplicateFieldId(spec.id));
        }
        if spec.kind.needs_options() && spec.options.is_empty() {
            return Err(SchemaError::MissingOptions {
                id: spec.id,
                kind: spec.kind,
            });
        }
        let pattern = match spec.validation.as_ref().and_then(|rule| rule.pattern.as_deref()) {
            Some(source) => Some(Regex::new(source).map_err(|source| {
                SchemaError::InvalidPattern {
                    id: spec.id.clone(),
                    source,
                }
            })?),
            None => None,
        };
        compiled.push(CompiledField { spec, pattern });
    }
    Ok(compiled)
}

pub(super) fn parse_json_schema(json: &str) -> Result<Vec<FieldSpec>, SchemaError> {
    Ok(serde_json::from_str(json)?)
}
