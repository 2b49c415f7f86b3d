//! Connect stage tracking
//!
//! Records how far a connect call got, for the failure log line.

/// Progress of a single connect call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStage {
    /// Nothing done yet
    Initial,

    /// Credentials file read and parsed
    CredentialsLoaded,

    /// Connection descriptor assembled
    DescriptorAssembled,

    /// Driver accepted the descriptor
    Opened,

    /// Liveness check passed
    Verified,
}

impl ConnectStage {
    /// Check if transition is valid
    pub fn can_transition_to(&self, next: ConnectStage) -> bool {
        use ConnectStage::*;

        matches!(
            (self, next),
            (Initial, CredentialsLoaded)
                | (CredentialsLoaded, DescriptorAssembled)
                | (DescriptorAssembled, Opened)
                | (Opened, Verified)
        )
    }

    /// Advance to the next stage
    ///
    /// Stages only move forward one step at a time; skipping one is a bug in
    /// the connect path.
    pub fn advance(&mut self, next: ConnectStage) {
        debug_assert!(
            self.can_transition_to(next),
            "invalid connect stage transition: {} -> {}",
            self,
            next
        );
        *self = next;
    }
}

impl std::fmt::Display for ConnectStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::CredentialsLoaded => write!(f, "credentials_loaded"),
            Self::DescriptorAssembled => write!(f, "descriptor_assembled"),
            Self::Opened => write!(f, "opened"),
            Self::Verified => write!(f, "verified"),
        }
    }
}
