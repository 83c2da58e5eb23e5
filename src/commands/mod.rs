pub mod apply;
pub mod bundle;

pub use apply::*;
pub use bundle::*;
