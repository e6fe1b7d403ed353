//! Macros for ergonomic action composition.

/// Chain actions written inline.
///
/// `chain![a, b, c]` is `chain(vec![a, b, c])`.
///
/// # Example
///
/// ```
/// use pythia::actions::{increment_aphorism_count, reset_aphorism_count};
/// use pythia::chain;
/// use pythia::core::{InstallationState, WorldState};
///
/// let action = chain![
///     reset_aphorism_count(),
///     increment_aphorism_count(),
///     increment_aphorism_count(),
/// ];
///
/// let mut world = InstallationState::new();
/// action.run(&mut world).unwrap();
/// assert_eq!(world.aphorism_count(), 2);
/// ```
#[macro_export]
macro_rules! chain {
    ($($action:expr),* $(,)?) => {
        $crate::actions::chain(::std::vec![$($action),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::actions::{do_nothing, increment_aphorism_count};
    use crate::core::{InstallationState, WorldState};

    #[test]
    fn chain_macro_runs_in_order() {
        let action = chain![increment_aphorism_count(), do_nothing(), increment_aphorism_count()];

        let mut world = InstallationState::new();
        action.run(&mut world).unwrap();
        assert_eq!(world.aphorism_count(), 2);
    }

    #[test]
    fn chain_macro_accepts_trailing_comma() {
        let action = chain![do_nothing::<InstallationState>(),];
        assert_eq!(action.name(), "chain(do_nothing)");
    }
}
