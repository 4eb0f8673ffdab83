mod entry;
mod store;

pub use entry::{Reflection, ReflectionContext};
pub use store::ReflectionLog;
