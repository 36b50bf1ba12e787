use serde::{Deserialize, Serialize};

use super::answers::AnswerValue;
use super::controller::{FormEngine, FormResult, SubmissionStatus, read_lock};
use super::schema::{FieldKind, FieldSpec};

pub const SELECT_PLACEHOLDER: &str = "-- Select --";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SubmitButton {
    pub text: String,
    #[serde(default)]
    pub variant: ButtonVariant,
}

impl SubmitButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: ButtonVariant::Primary,
        }
    }

    pub fn variant(mut self, value: ButtonVariant) -> Self {
        self.variant = value;
        self
    }
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self::new("Submit")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputType {
    Text,
    Email,
    Date,
}

impl InputType {
    pub const fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Date => "date",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionView {
    pub label: String,
    pub value: String,
    pub checked: bool,
}

/// Widget the rendering layer should draw for a field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Widget {
    Input {
        input_type: InputType,
        value: String,
    },
    TextArea {
        value: String,
    },
    Select {
        placeholder: &'static str,
        options: Vec<OptionView>,
        selected: Option<String>,
    },
    CheckboxGroup {
        options: Vec<OptionView>,
    },
    RadioGroup {
        options: Vec<OptionView>,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldView {
    pub id: String,
    pub label: String,
    /// Drives the required marker next to the label.
    pub required: bool,
    pub widget: Widget,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmitButtonView {
    pub text: String,
    pub variant: ButtonVariant,
    pub disabled: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub submit: SubmitButtonView,
}

impl FormEngine {
    pub fn view(&self) -> FormResult<FormView> {
        let state = read_lock(&self.state, "building form view")?;
        let fields = self
            .fields()
            .map(|spec| {
                field_view(
                    spec,
                    state.answers.get(&spec.id),
                    state.errors.get(&spec.id),
                )
            })
            .collect();
        Ok(FormView {
            fields,
            submit: self.button_view(state.status),
        })
    }

    pub fn field_view(&self, field_id: &str) -> FormResult<Option<FieldView>> {
        let Some(spec) = self.field(field_id) else {
            return Ok(None);
        };
        let state = read_lock(&self.state, "building field view")?;
        Ok(Some(field_view(
            spec,
            state.answers.get(field_id),
            state.errors.get(field_id),
        )))
    }

    pub fn submit_button_view(&self) -> FormResult<SubmitButtonView> {
        Ok(self.button_view(self.status()?))
    }

    fn button_view(&self, status: SubmissionStatus) -> SubmitButtonView {
        let submitting = status == SubmissionStatus::Submitting;
        let button = &self.options.submit_button;
        SubmitButtonView {
            text: if submitting {
                self.options.submitting_text.clone()
            } else {
                button.text.clone()
            },
            variant: button.variant,
            disabled: submitting,
        }
    }
}

fn field_view(spec: &FieldSpec, answer: Option<&AnswerValue>, error: Option<&String>) -> FieldView {
    let text = answer.and_then(AnswerValue::as_text).unwrap_or_default();
    let widget = match spec.kind {
        FieldKind::Text => Widget::Input {
            input_type: InputType::Text,
            value: text.to_owned(),
        },
        FieldKind::Email => Widget::Input {
            input_type: InputType::Email,
            value: text.to_owned(),
        },
        FieldKind::Date => Widget::Input {
            input_type: InputType::Date,
            value: text.to_owned(),
        },
        FieldKind::Textarea => Widget::TextArea {
            value: text.to_owned(),
        },
        FieldKind::Select => Widget::Select {
            placeholder: SELECT_PLACEHOLDER,
            options: option_views(spec, |value| value == text),
            selected: (!text.is_empty()).then(|| text.to_owned()),
        },
        FieldKind::Radio => Widget::RadioGroup {
            options: option_views(spec, |value| value == text),
        },
        FieldKind::Checkbox => Widget::CheckboxGroup {
            options: option_views(spec, |value| {
                answer.is_some_and(|answer| answer.is_checked(value))
            }),
        },
    };

    FieldView {
        id: spec.id.clone(),
        label: spec.label.clone(),
        required: spec.required,
        widget,
        error: error.filter(|message| !message.is_empty()).cloned(),
    }
}

fn option_views(spec: &FieldSpec, is_checked: impl Fn(&str) -> bool) -> Vec<OptionView> {
    spec.options
        .iter()
        .map(|option| OptionView {
            label: option.label.clone(),
            value: option.value.clone(),
            checked: is_checked(&option.value),
        })
        .collect()
}
