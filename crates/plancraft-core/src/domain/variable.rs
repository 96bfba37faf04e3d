//! Planning variable metadata and shadow variable listeners.

/// The kind of a planning variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// A genuine variable assigned directly by the solver.
    Genuine,
    /// A chained variable: its value is another entity of the same type,
    /// forming a linked structure (e.g., vehicle routes).
    Chained,
    /// A shadow variable: derived from genuine variables by listeners,
    /// never assigned by the solver directly.
    Shadow,
}

/// An update callback for one derived (shadow) variable.
///
/// Listeners form an explicit ordered list on the score director and run
/// in registration order after each committed move. They are never invoked
/// during the do/undo candidate evaluation cycle.
pub struct VariableListener<S> {
    /// Name of the shadow variable this listener maintains.
    pub name: &'static str,
    /// Name of the genuine source variable that triggers the update.
    pub source_variable: &'static str,
    /// Recomputes the shadow variable from the current solution state.
    pub update: fn(&mut S),
}

impl<S> VariableListener<S> {
    /// Creates a new listener.
    pub fn new(name: &'static str, source_variable: &'static str, update: fn(&mut S)) -> Self {
        Self {
            name,
            source_variable,
            update,
        }
    }
}

impl<S> Clone for VariableListener<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            source_variable: self.source_variable,
            update: self.update,
        }
    }
}

impl<S> std::fmt::Debug for VariableListener<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableListener")
            .field("name", &self.name)
            .field("source_variable", &self.source_variable)
            .finish()
    }
}
