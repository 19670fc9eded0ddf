mod extract;
mod utils;

fn main() {}
