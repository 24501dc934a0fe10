// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ways in which a chaos game can refuse to run.

use failure::Fail;

/// Every failure the library reports.  All of them are raised
/// synchronously by the operation that discovered them; none of them
/// are worth retrying.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum ChaosError {
    /// The requested shape name has no registered definition.
    #[fail(display = "no shape named '{}' is registered", _0)]
    UnknownShape(String),

    /// The requested rule name has no registered definition.
    #[fail(display = "no rule named '{}' is registered", _0)]
    UnknownRule(String),

    /// A regular polygon needs at least three vertices.
    #[fail(display = "a polygon needs at least 3 vertices, got {}", _0)]
    DegeneratePolygon(usize),

    /// The canvas has no pixels to draw on.
    #[fail(display = "the canvas must be at least 1x1 pixels")]
    EmptyCanvas,

    /// A batch must produce at least one point.
    #[fail(display = "the batch size must be greater than zero")]
    EmptyBatch,

    /// Points were requested before a shape and a rule were selected,
    /// or a tick arrived for a session that is not running.
    #[fail(display = "no shape and rule are active")]
    NotInitialized,
}
