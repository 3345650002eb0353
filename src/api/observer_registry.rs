use crate::error::{RaceError, RaceResult};
use crate::extensions::RaceObserver;
use crate::render::Renderer;

use super::RaceChart;

impl<R: Renderer> RaceChart<R> {
    /// Registers an observer with a unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn RaceObserver>) -> RaceResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(RaceError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(RaceError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.core.runtime.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .core
            .runtime
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.core.runtime.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.core.runtime.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.core
            .runtime
            .observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }
}
