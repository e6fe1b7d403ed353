//! The deferred-effect unit shared by the library and the controller.

use super::error::ActionError;
use std::fmt;
use std::sync::Arc;

/// Signature of an action body.
pub type ActionFn<W> = dyn Fn(&mut W) -> Result<(), ActionError> + Send + Sync;

/// A behaviour run against a world state.
///
/// Building an action has no side effects: the body only runs when
/// [`run`](Self::run) is called, and it may be run any number of times.
/// Clones share the same body.
///
/// # Example
///
/// ```rust
/// use pythia::actions::Action;
///
/// let bump: Action<u32> = Action::new("bump", |count: &mut u32| {
///     *count += 1;
///     Ok(())
/// });
///
/// let mut count = 0;
/// bump.run(&mut count).unwrap();
/// bump.clone().run(&mut count).unwrap();
/// assert_eq!(count, 2);
/// ```
pub struct Action<W> {
    name: String,
    body: Arc<ActionFn<W>>,
}

impl<W> Action<W> {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut W) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, world: &mut W) -> Result<(), ActionError> {
        (self.body)(world)
    }
}

impl<W> Clone for Action<W> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            body: Arc::clone(&self.body),
        }
    }
}

impl<W> fmt::Debug for Action<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}
