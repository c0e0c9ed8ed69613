mod session_store;
mod suggestions;
mod transcript;

pub use session_store::*;
pub use suggestions::*;
pub use transcript::*;
