#![allow(dead_code)]

#[derive(blockkit::form::FormSchema)]
struct Contact {
    #[field(nickname = "ada")]
    name: String,
}

fn main() {}
