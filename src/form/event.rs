use super::answers::FieldInput;
use super::controller::{FormEngine, SubmitError, SubmitOutcome};

/// User intent reported by the rendering layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormEvent {
    Change { field_id: String, input: FieldInput },
    /// The rendering layer has already prevented the default form submission.
    Submit,
}

impl FormEvent {
    pub fn change(field_id: impl Into<String>, input: impl Into<FieldInput>) -> Self {
        FormEvent::Change {
            field_id: field_id.into(),
            input: input.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventOutcome {
    Changed { applied: bool },
    Submitted(SubmitOutcome),
}

impl FormEngine {
    pub async fn dispatch(&self, event: FormEvent) -> Result<EventOutcome, SubmitError> {
        match event {
            FormEvent::Change { field_id, input } => Ok(EventOutcome::Changed {
                applied: self.record_change(&field_id, input)?,
            }),
            FormEvent::Submit => Ok(EventOutcome::Submitted(self.submit().await?)),
        }
    }
}
