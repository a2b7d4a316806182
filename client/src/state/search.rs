//! Search autocomplete dropdown state.
//!
//! Every input event advances `generation`. A suggestion response is applied
//! only if it was requested under the current generation, so a slow response
//! can never overwrite the results of a newer query (or reopen a list the user
//! already cleared).

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

/// What the input handler has to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryPlan {
    /// The query is too short; the list has been hidden and cleared.
    Clear,
    /// Request suggestions for `query`, tagging the response with `generation`.
    Fetch { generation: u64, query: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub results: Vec<String>,
    pub visible: bool,
    generation: u64,
}

impl SearchState {
    /// Handle an input event with the current input value.
    pub fn on_input(&mut self, value: &str, min_len: usize) -> QueryPlan {
        self.generation = self.generation.wrapping_add(1);
        if value.chars().count() < min_len {
            self.results.clear();
            self.visible = false;
            return QueryPlan::Clear;
        }
        QueryPlan::Fetch {
            generation: self.generation,
            query: value.to_owned(),
        }
    }

    /// Apply suggestions fetched for `generation`. Returns `false` for stale responses.
    pub fn accept(&mut self, generation: u64, results: Vec<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.visible = !results.is_empty();
        self.results = results;
        true
    }

    /// A suggestion was clicked: hide the list and return the value for the input.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let value = self.results.get(index).cloned()?;
        self.visible = false;
        Some(value)
    }

    /// A click landed somewhere other than the input.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}
