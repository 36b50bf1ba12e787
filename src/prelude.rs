pub use crate::form::{
    AnswerState, AnswerValue, ButtonVariant, ErrorState, FieldInput, FieldKind, FieldSpec,
    FormEngine, FormEvent, FormOptions, FormSchema, ReentrantSubmit, SubmissionStatus,
    SubmitButton, SubmitOutcome, ValidationRule,
};
pub use crate::media::{ImageBlock, ImageLoadState, ImageLoadTracker, ImageView};
