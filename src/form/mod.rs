mod answers;
mod controller;
mod event;
mod schema;
mod validation;
mod view;


pub use answers::{AnswerState, AnswerValue, ErrorState, FieldInput};
pub use blockkit_form_derive::FormSchema;
pub use controller::{
    BoxError, BoxedSubmitFuture, FormEngine, FormError, FormOptions, FormResult, FormSnapshot,
    ReentrantSubmit, SubmissionStatus, SubmitError, SubmitHandler, SubmitOutcome,
};
pub use event::{EventOutcome, FormEvent};
pub use schema::{FieldKind, FieldOption, FieldSpec, FormSchema, SchemaError, ValidationRule};
pub use view::{
    ButtonVariant, FieldView, FormView, InputType, OptionView, SELECT_PLACEHOLDER, SubmitButton,
    SubmitButtonView, Widget,
};
