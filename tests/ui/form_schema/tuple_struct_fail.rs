#![allow(dead_code)]

#[derive(blockkit::form::FormSchema)]
struct Pair(String, String);

fn main() {}
