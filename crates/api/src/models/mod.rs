pub mod installation;
pub mod selection;
pub mod version;

pub use installation::*;
pub use selection::*;
pub use version::*;
