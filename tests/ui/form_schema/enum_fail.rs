#![allow(dead_code)]

#[derive(blockkit::form::FormSchema)]
enum Plan {
    Free,
    Pro,
}

fn main() {}
