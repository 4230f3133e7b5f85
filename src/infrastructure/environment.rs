//! Environment adapters.

use crate::application::ports::Environment;

/// Environment with a fixed user agent and location.
///
/// Hosts that learn these values once (from request headers, a webview
/// bridge, a config file) build one of these and pass it around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticEnvironment {
    user_agent: String,
    location: String,
}

impl StaticEnvironment {
    /// Create an environment with the given user agent and location.
    pub fn new(user_agent: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            location: location.into(),
        }
    }

    /// Replace the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

impl Environment for StaticEnvironment {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}
