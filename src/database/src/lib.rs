mod generators;
mod snapshot;

pub use generators::*;
pub use snapshot::*;
