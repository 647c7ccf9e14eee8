pub mod mnemonic;
pub mod mode;
pub mod reg;
pub mod table;

pub use mnemonic::Mnemonic;
pub use mode::Mode;
pub use reg::Index;
