mod license;
mod parameter;
mod placeholder;
pub use license::*;
pub use parameter::*;
pub use placeholder::*;
