pub mod rewrite;
pub mod tools;
