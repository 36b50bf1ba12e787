use blockkit::form::{FieldKind, FormSchema};

#[derive(blockkit::form::FormSchema)]
struct NewsletterForm {
    #[field(kind = "email", required, pattern = "^.+@.+$")]
    email: String,
    #[field(kind = "select", option(label = "Weekly", value = "weekly"))]
    cadence: String,
    #[field(kind = "textarea", required = false)]
    note: String,
}

fn main() {
    let schema = NewsletterForm::schema();
    assert_eq!(schema.len(), 3);
    assert_eq!(schema[0].id, "email");
    assert!(schema[0].required);
    assert_eq!(schema[1].kind, FieldKind::Select);
    assert_eq!(schema[1].options[0].value, "weekly");
    assert!(!schema[2].required);
}
