//! List construction settings

/// Configuration parameters for a [`LinkedList`](crate::LinkedList)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// Node slots reserved up front
    pub initial_capacity: usize,

    /// Run `validate()` after every structural mutation
    pub check_invariants: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            check_invariants: cfg!(debug_assertions),
        }
    }
}

impl ListConfig {
    /// Reserve room for `capacity` nodes
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enable or disable post-mutation invariant checks
    pub fn check_invariants(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }
}
