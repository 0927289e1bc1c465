//! Capability predicates for a terminal invocation.

use emissary_core::Client;

/// Client collaborator describing a command-line invocation.
///
/// The shell is always a command-line client; headless and debugging are
/// selected by the user's flags. Debugging wins over headless when both
/// are set, which the dispatcher expresses by routing to the interactive
/// path.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TerminalClient {
    headless: bool,
    debugging: bool,
}

impl TerminalClient {
    pub(crate) const fn new(headless: bool, debugging: bool) -> Self {
        Self {
            headless,
            debugging,
        }
    }
}

impl Client for TerminalClient {
    fn is_command_line(&self) -> bool {
        true
    }

    fn is_headless(&self) -> bool {
        self.headless
    }

    fn is_debugging(&self) -> bool {
        self.debugging
    }
}

#[cfg(test)]
mod tests {
    use emissary_core::DeliveryMode;

    use super::*;

    #[test]
    fn maps_flags_to_delivery_modes() {
        assert_eq!(
            DeliveryMode::for_client(&TerminalClient::new(true, false)),
            DeliveryMode::Headless
        );
        assert_eq!(
            DeliveryMode::for_client(&TerminalClient::new(false, false)),
            DeliveryMode::Interactive
        );
        assert_eq!(
            DeliveryMode::for_client(&TerminalClient::new(true, true)),
            DeliveryMode::Interactive
        );
    }
}
