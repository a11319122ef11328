mod builder;
mod intent;
mod transaction;
pub use builder::*;
pub use intent::*;
pub use transaction::*;
