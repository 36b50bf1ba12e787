#![allow(dead_code)]

#[derive(blockkit::form::FormSchema)]
struct Draft<T> {
    value: T,
}

fn main() {}
