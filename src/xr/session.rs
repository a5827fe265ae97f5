use crate::engine::EngineError;

/// Immersive session lifecycle
///
/// `supported` stays `None` until the platform has answered whether
/// immersive VR is available at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XrSession {
    pub supported: Option<bool>,
    active: bool,
}

impl XrSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_supported(&mut self, supported: bool) {
        self.supported = Some(supported);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the session active, rejecting the request if VR is not known to
    /// be supported or a session is already running.
    pub fn request(&mut self) -> Result<(), EngineError> {
        if self.supported != Some(true) {
            return Err(EngineError::XrUnsupported);
        }
        if self.active {
            return Err(EngineError::SessionActive);
        }
        self.active = true;
        Ok(())
    }

    pub fn end(&mut self) -> Result<(), EngineError> {
        if !self.active {
            return Err(EngineError::NoSession);
        }
        self.active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_requires_support() {
        let mut session = XrSession::new();
        assert!(matches!(session.request(), Err(EngineError::XrUnsupported)));

        session.set_supported(false);
        assert!(matches!(session.request(), Err(EngineError::XrUnsupported)));
        assert!(!session.is_active());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = XrSession::new();
        session.set_supported(true);

        session.request().unwrap();
        assert!(session.is_active());
        assert!(matches!(session.request(), Err(EngineError::SessionActive)));

        session.end().unwrap();
        assert!(!session.is_active());
        assert!(matches!(session.end(), Err(EngineError::NoSession)));
    }
}
