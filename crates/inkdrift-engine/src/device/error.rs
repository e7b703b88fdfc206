use std::fmt;

/// A GPU object the runtime needs could not be obtained.
///
/// Carries a short description of what was missing (surface, adapter, device,
/// surface format). The runtime treats it as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingContext(pub String);

impl MissingContext {
    pub fn new(what: impl Into<String>) -> Self {
        Self(what.into())
    }
}

impl fmt::Display for MissingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing rendering context: {}", self.0)
    }
}

impl std::error::Error for MissingContext {}

/// What to do after `get_current_texture` fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame may render.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Unrecoverable (out of memory).
    Fatal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_piece() {
        let e = MissingContext::new("no GPU adapter");
        assert_eq!(e.to_string(), "missing rendering context: no GPU adapter");
    }

    #[test]
    fn downcasts_through_anyhow() {
        let e: anyhow::Error = MissingContext::new("surface").into();
        assert!(e.downcast_ref::<MissingContext>().is_some());
    }
}
