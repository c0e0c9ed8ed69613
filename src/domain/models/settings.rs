use std::time::Duration;

/// Timing and cancellation behaviour of send sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    /// Wait between appending the user message and showing the placeholder.
    pub composing_delay: Duration,
    /// Wait between showing the placeholder and resolving the reply.
    pub resolve_delay: Duration,
    /// Cancel outstanding sequences whenever a new message is sent.
    pub cancel_on_send: bool,
}

impl Default for SessionSettings {
    fn default() -> SessionSettings {
        return SessionSettings {
            composing_delay: Duration::from_millis(500),
            resolve_delay: Duration::from_millis(1500),
            cancel_on_send: false,
        };
    }
}
