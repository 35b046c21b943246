/// Knobs for a single search call. The defaults search without limits and consult the
/// connected components of a [PathingGrid](crate::pathing_grid::PathingGrid) when they
/// are up to date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Upper bound on the number of expanded nodes. Exceeding it aborts the search with
    /// [PathError::Aborted](crate::error::PathError::Aborted).
    pub max_expansions: Option<usize>,
    /// Reject unreachable goals through the component map before searching.
    pub check_components: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            max_expansions: None,
            check_components: true,
        }
    }
}

impl SearchConfig {
    pub fn new() -> SearchConfig {
        SearchConfig::default()
    }
    pub fn with_max_expansions(mut self, max_expansions: usize) -> SearchConfig {
        self.max_expansions = Some(max_expansions);
        self
    }
    pub fn with_component_check(mut self, check_components: bool) -> SearchConfig {
        self.check_components = check_components;
        self
    }
}
