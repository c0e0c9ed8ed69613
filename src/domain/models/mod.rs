mod annotation;
mod error;
mod id;
mod intent;
mod media;
mod message;
mod resolver;
mod sender;
mod sequence;
mod settings;
mod slash_commands;
mod state;

pub use annotation::*;
pub use error::*;
pub use id::*;
pub use intent::*;
pub use media::*;
pub use message::*;
pub use resolver::*;
pub use sender::*;
pub use sequence::*;
pub use settings::*;
pub use slash_commands::*;
pub use state::*;
