// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rules of the game: given where we are and which corner was
//! drawn, where do we jump to?
//!
//! Both rules start from the vector pointing from the chosen vertex
//! back to the current point, and shrink it by a step length `L`.  In
//! simple construction `L` is always one less than the number of
//! corners, which for the triangle gives the classic midpoint jump and
//! the Sierpinski gasket.  In varied construction `L` is drawn afresh
//! on every jump from `2..=n-1` (very rarely `1`), which smears the
//! attractor into something less regular.

use num::Complex;
use rand::Rng;

use crate::error::ChaosError;
use crate::planes::Point;

/// Whether the step length is fixed or random.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Construction {
    /// `L = n - 1` on every step.
    Simple,
    /// `L = 1 + ceil(u * (n - 2))` for a fresh uniform `u` in `[0, 1)`.
    Varied,
}

impl Construction {
    /// Map the user-facing "simple construction" flag onto a mode.
    pub fn from_simple(simple: bool) -> Self {
        if simple {
            Construction::Simple
        } else {
            Construction::Varied
        }
    }

    /// The step length for a polygon with `vertex_count` corners.
    /// Varied construction consumes exactly one draw from `rng`; simple
    /// construction consumes none.
    pub fn step_length<R: Rng + ?Sized>(self, vertex_count: usize, rng: &mut R) -> f64 {
        let n = vertex_count as f64;
        match self {
            Construction::Simple => n - 1.0,
            Construction::Varied => {
                let u: f64 = rng.gen();
                1.0 + (u * (n - 2.0)).ceil()
            }
        }
    }
}

/// The closed set of transforms a game can be played with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Jump toward the vertex: `vertex + (point - vertex) / L`.
    VectorCenter,
    /// The vector-center jump, multiplied by `1 - i/L`: the two axes
    /// are cross-coupled by a second factor of `1/L`.  The name is
    /// historical; this is not a rotation by ninety degrees, and it is
    /// kept exactly as it has always been computed.
    VectorCenterCcw90,
}

impl Rule {
    /// Every rule, in the order they are offered.
    pub fn all() -> &'static [Rule] {
        &[Rule::VectorCenter, Rule::VectorCenterCcw90]
    }

    /// The name a rule is selected by.
    pub fn name(self) -> &'static str {
        match self {
            Rule::VectorCenter => "vector-center",
            Rule::VectorCenterCcw90 => "vector-center-ccw90",
        }
    }

    /// A human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Rule::VectorCenter => "vector center",
            Rule::VectorCenterCcw90 => "90\u{b0} CCW from vector center",
        }
    }

    /// Look a rule up by its name.
    pub fn from_name(name: &str) -> Result<Rule, ChaosError> {
        Rule::all()
            .iter()
            .copied()
            .find(|rule| rule.name() == name)
            .ok_or_else(|| ChaosError::UnknownRule(name.to_string()))
    }

    /// One jump of the game, from `previous` by way of `vertex`.
    pub fn apply<R: Rng + ?Sized>(
        self,
        previous: Point,
        vertex: Point,
        vertex_count: usize,
        construction: Construction,
        rng: &mut R,
    ) -> Point {
        let d = previous - vertex;
        let l = construction.step_length(vertex_count, rng);
        match self {
            Rule::VectorCenter => vertex + d / l,
            Rule::VectorCenterCcw90 => vertex + d / l * Complex::new(1.0, -1.0 / l),
        }
    }
}
