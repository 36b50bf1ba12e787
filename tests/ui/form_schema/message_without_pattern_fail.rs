#![allow(dead_code)]

#[derive(blockkit::form::FormSchema)]
struct Contact {
    #[field(kind = "email", message = "bad email")]
    email: String,
}

fn main() {}
