use serde::{Deserialize, Serialize};

use super::domain::{Factor, FactorScores};

/// A factor and the rating it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedFactor {
    pub factor: Factor,
    pub score: u8,
}

/// Order factors by rating, highest first.
///
/// Equal ratings keep `Factor::PRIORITY` order, so the dominant factor is
/// reproducible for tied input.
pub fn rank(scores: &FactorScores) -> [RankedFactor; 4] {
    let mut ranked = Factor::PRIORITY.map(|factor| RankedFactor {
        factor,
        score: scores.get(factor),
    });
    // sort_by is stable
    ranked.sort_by(|left, right| right.score.cmp(&left.score));
    ranked
}
