pub mod environment;
pub mod expr;
pub mod format;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
