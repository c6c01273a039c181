mod module;
mod nt;
mod posix;

pub use module::*;
pub use nt::Nt;
pub use posix::Posix;
