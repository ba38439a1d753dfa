use super::events::Change;
use super::types::Action;

/// Trait for dispatching state actions.
///
/// # Semantics
///
/// - **Ordering**: Actions apply in the order received. No implicit batching.
/// - **Atomicity**: An action either applies fully or returns an error
///   without touching state.
/// - **Changes**: On success, dispatch returns a non-empty `Vec<Change>`
///   describing what happened, in order. Callers can react to these without
///   re-reading the whole state.
pub trait Store {
    type Error;
    fn dispatch(&mut self, action: Action) -> Result<Vec<Change>, Self::Error>;
}
