pub mod assembler;
pub mod codegen;
pub mod config;
pub mod error;
pub mod image;
pub mod operand;
pub mod parser;
pub mod symbols;
pub mod util;

pub use assembler::{assemble, Assembler, Program, Record};
pub use config::Config;
pub use error::{Diag, Error};
