use std::collections::BTreeMap;

use tracing::debug;

use super::answers::{AnswerValue, ErrorState, FieldInput};
use super::controller::{FormEngine, FormResult, write_lock};
use super::schema::{CompiledField, FieldKind};

impl FormEngine {
    /// Applies one edit from the rendering layer.
    ///
    /// Returns `false` when the edit was ignored: unknown field ids and input
    /// shapes that do not fit the field's kind are no-ops. An applied edit
    /// clears the field's error; it never validates.
    pub fn record_change(&self, field_id: &str, input: impl Into<FieldInput>) -> FormResult<bool> {
        let Some(field) = self.compiled_field(field_id) else {
            debug!(field_id, "ignoring change for unknown field");
            return Ok(false);
        };
        let input: FieldInput = input.into();

        let mut state = write_lock(&self.state, "recording field change")?;
        match (field.spec.kind, input) {
            (FieldKind::Checkbox, FieldInput::Toggle { option, checked }) => {
                let entry = state
                    .answers
                    .entry(field_id.to_owned())
                    .or_insert_with(|| AnswerValue::Choices(BTreeMap::new()));
                match entry {
                    AnswerValue::Choices(choices) => {
                        choices.insert(option, checked);
                    }
                    other => *other = AnswerValue::Choices(BTreeMap::from([(option, checked)])),
                }
            }
            (FieldKind::Checkbox, FieldInput::Text(_)) | (_, FieldInput::Toggle { .. }) => {
                debug!(
                    field_id,
                    kind = %field.spec.kind,
                    "ignoring input that does not fit the field kind"
                );
                return Ok(false);
            }
            (_, FieldInput::Text(value)) => {
                state
                    .answers
                    .insert(field_id.to_owned(), AnswerValue::Text(value));
            }
        }

        state.errors.insert(field_id.to_owned(), String::new());
        if state.first_error.as_deref() == Some(field_id) {
            state.first_error = first_error_key(&self.fields, &state.errors);
        }
        Ok(true)
    }

    /// Runs one validation pass over every field in declaration order and
    /// replaces the whole error state with the result.
    pub fn validate(&self) -> FormResult<bool> {
        let mut state = write_lock(&self.state, "applying validation result")?;
        let errors = self
            .fields
            .iter()
            .map(|field| {
                let message =
                    validate_field(field, state.answers.get(field.id())).unwrap_or_default();
                (field.id().to_owned(), message)
            })
            .collect::<ErrorState>();

        state.first_error = first_error_key(&self.fields, &errors);
        state.errors = errors;
        let is_valid = state.first_error.is_none();
        debug!(is_valid, "form validated");
        Ok(is_valid)
    }
}

/// Required check first; the pattern only runs on a non-empty text answer.
pub(super) fn validate_field(
    field: &CompiledField,
    answer: Option<&AnswerValue>,
) -> Option<String> {
    let spec = &field.spec;
    if spec.required && !answer.is_some_and(AnswerValue::is_answered) {
        return Some(format!("{} is required", spec.label));
    }

    if let Some(pattern) = &field.pattern
        && let Some(text) = answer.and_then(AnswerValue::as_text)
        && !text.is_empty()
        && !pattern.is_match(text)
    {
        let message = spec
            .validation
            .as_ref()
            .and_then(|rule| rule.message.clone())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("{} is invalid", spec.label));
        return Some(message);
    }

    None
}

pub(super) fn first_error_key(fields: &[CompiledField], errors: &ErrorState) -> Option<String> {
    fields
        .iter()
        .map(CompiledField::id)
        .find(|id| errors.get(*id).is_some_and(|message| !message.is_empty()))
        .map(str::to_owned)
}
