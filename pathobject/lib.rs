mod error;
mod io;
mod path;
mod path_type;
mod settings;

pub use error::*;
pub use io::*;
pub use path::*;
pub use path_type::*;
pub use settings::*;

pub use pathobject_syntax as syntax;
pub use pathobject_syntax::{Capabilities, ModuleError, Nt, PathModule, Posix};
