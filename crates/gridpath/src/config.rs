use crate::pathfinder::SearchError;

/// Step cost for a move that changes one coordinate.
pub const ORTHOGONAL_COST: f32 = 1.0;
/// Step cost for a move that changes both coordinates.
pub const DIAGONAL_COST: f32 = 1.5;

/// Movement rules and limits for a [`Pathfinder`](crate::Pathfinder).
///
/// ```
/// use gridpath::SearchConfig;
///
/// let cfg = SearchConfig::default().with_diagonals(false).with_max_expansions(10_000);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Allow the four diagonal moves in addition to the orthogonal ones.
    pub diagonals: bool,
    pub orthogonal_cost: f32,
    pub diagonal_cost: f32,
    /// Give up with [`SearchError::LimitReached`] after expanding this many
    /// nodes. `None` searches until the open set is exhausted.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            diagonals: true,
            orthogonal_cost: ORTHOGONAL_COST,
            diagonal_cost: DIAGONAL_COST,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    pub fn with_diagonals(mut self, diagonals: bool) -> Self {
        self.diagonals = diagonals;
        self
    }

    pub fn with_costs(mut self, orthogonal: f32, diagonal: f32) -> Self {
        self.orthogonal_cost = orthogonal;
        self.diagonal_cost = diagonal;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Costs must be finite and non-negative.
    pub fn validate(&self) -> Result<(), SearchError> {
        for (name, value) in [
            ("orthogonal_cost", self.orthogonal_cost),
            ("diagonal_cost", self.diagonal_cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::InvalidCost { name, value });
            }
        }
        Ok(())
    }

    /// Cost of a single step between adjacent cells.
    #[inline]
    pub(crate) fn step_cost(&self, diagonal: bool) -> f32 {
        if diagonal {
            self.diagonal_cost
        } else {
            self.orthogonal_cost
        }
    }
}
