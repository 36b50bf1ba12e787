#![allow(dead_code)]

#[derive(blockkit::form::FormSchema)]
struct Contact {
    #[field(kind = "phone")]
    number: String,
}

fn main() {}
