//! Docblock extraction: line-oriented, no tokenizer or AST.

pub mod docblock;
pub mod machine;
pub mod methods;
pub mod rules;
pub mod scanner;

pub use scanner::scan;
