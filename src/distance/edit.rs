use serde::{Deserialize, Serialize};

use crate::utils::validation::{check_cost, ValidationError};

/// Convert a symbol count to a cost multiplier.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Costs of the three edit operations.
///
/// Insertion consumes a symbol of the second sequence, deletion a symbol of
/// the first one. Unit costs give the classical Levenshtein distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditCosts {
    pub substitution: f64,
    pub insertion: f64,
    pub deletion: f64,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self::UNIT
    }
}

impl EditCosts {
    /// Levenshtein costs
    pub const UNIT: Self = Self {
        substitution: 1.0,
        insertion: 1.0,
        deletion: 1.0,
    };

    pub fn new(substitution: f64, insertion: f64, deletion: f64) -> Self {
        Self {
            substitution,
            insertion,
            deletion,
        }
    }

    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCost` if any cost is negative or not finite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_cost("substitution", self.substitution)?;
        check_cost("insertion", self.insertion)?;
        check_cost("deletion", self.deletion)
    }

    /// Whether `d(x, y) == d(y, x)` holds for every pair under these costs
    pub fn is_symmetric(&self) -> bool {
        self.insertion == self.deletion
    }

    /// Costs to use when the two sequences swap places
    fn transposed(self) -> Self {
        Self {
            substitution: self.substitution,
            insertion: self.deletion,
            deletion: self.insertion,
        }
    }
}

/// How a raw alignment cost is scaled before it is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Raw alignment cost
    #[default]
    None,
    /// Divide by the length of the longer sequence; two empty sequences are at distance 0
    MaxLength,
}

impl Normalization {
    pub(crate) fn apply(self, distance: f64, x_len: usize, y_len: usize) -> f64 {
        match self {
            Self::None => distance,
            Self::MaxLength => {
                let longest = x_len.max(y_len);
                if longest == 0 {
                    0.0
                } else {
                    distance / count_to_f64(longest)
                }
            }
        }
    }
}

/// Edit distance configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditDistanceOptions {
    /// Costs of substitution, insertion and deletion
    pub costs: EditCosts,

    /// Collapse runs of identical consecutive symbols before aligning
    pub collapse_repeats: bool,

    /// Scaling applied to each distance
    pub normalization: Normalization,
}

impl EditDistanceOptions {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCost` if the cost model is unusable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.costs.validate()
    }
}

/// Classical unit-cost edit distance between two symbol sequences.
///
/// # Examples
///
/// ```
/// use abx_score::distance::edit::edit_distance;
///
/// assert_eq!(edit_distance(&[1, 2, 3], &[1, 2, 3]), 0.0);
/// assert_eq!(edit_distance(&[1, 2, 3], &[1, 3]), 1.0);
/// assert_eq!(edit_distance(&[], &[4, 5]), 2.0);
/// ```
pub fn edit_distance(x: &[i64], y: &[i64]) -> f64 {
    align(x, y, EditCosts::UNIT, &mut Vec::new())
}

/// Minimum alignment cost of `x` against `y` under `costs`.
///
/// Uses a single rolling row sized by the shorter sequence; `row` is scratch
/// space that callers may reuse across pairs to avoid reallocating.
pub fn align(x: &[i64], y: &[i64], costs: EditCosts, row: &mut Vec<f64>) -> f64 {
    if y.len() > x.len() {
        return align(y, x, costs.transposed(), row);
    }

    row.clear();
    row.extend((0..=y.len()).map(|j| count_to_f64(j) * costs.insertion));

    for (i, &xs) in x.iter().enumerate() {
        // cost[i][j - 1] of the previous row, before it is overwritten
        let mut diagonal = row[0];
        row[0] = count_to_f64(i + 1) * costs.deletion;

        for (j, &ys) in y.iter().enumerate() {
            let up = row[j + 1];
            let substitution = if xs == ys { 0.0 } else { costs.substitution };
            row[j + 1] = (diagonal + substitution)
                .min(up + costs.deletion)
                .min(row[j] + costs.insertion);
            diagonal = up;
        }
    }

    row[y.len()]
}
