//! Per-worker session state

use crate::engine::DatabaseHandle;

/// The single database handle owned by a dispatcher
///
/// Never shared: the handle is reachable only through `&mut self`.
#[derive(Default)]
pub struct SessionState {
    handle: Option<Box<dyn DatabaseHandle>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle_mut(&mut self) -> Option<&mut (dyn DatabaseHandle + 'static)> {
        self.handle.as_deref_mut()
    }

    /// Install `handle`, returning the one it displaced
    ///
    /// The caller owns the displaced handle and must close it.
    pub fn replace(
        &mut self,
        handle: Box<dyn DatabaseHandle>,
    ) -> Option<Box<dyn DatabaseHandle>> {
        self.handle.replace(handle)
    }

    /// Remove and return the handle, leaving the session closed
    pub fn take(&mut self) -> Option<Box<dyn DatabaseHandle>> {
        self.handle.take()
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("open", &self.is_open())
            .finish()
    }
}
