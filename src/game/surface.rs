//! Collaborator traits the controller renders through.
//!
//! The controller never touches the DOM directly: it asks a [`DisplaySurface`]
//! for its bounds and to place / drop targets, and pushes text through a
//! [`Scoreboard`]. `web::DomSurface` implements both on top of `web-sys`,
//! [`super::headless::HeadlessSurface`] implements both in memory.

use super::HeartId;

/// Size of the game area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest top-left offset that keeps a `size` square fully inside, per axis.
    /// An axis smaller than the target pins to 0.
    pub fn max_offset(&self, size: f64) -> (f64, f64) {
        ((self.width - size).max(0.0), (self.height - size).max(0.0))
    }

    /// True when a `size` square at `pos` lies fully inside these bounds.
    pub fn contains_square(&self, pos: Position, size: f64) -> bool {
        let (max_x, max_y) = self.max_offset(size);
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max_x && pos.y <= max_y
    }
}

/// Top-left corner of a target, relative to the game area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The bounded region targets are rendered into.
pub trait DisplaySurface {
    fn bounds(&self) -> Bounds;
    fn render_target(&mut self, id: HeartId, position: Position, size: f64);
    /// Must be a no-op for unknown or already removed ids.
    fn remove_target(&mut self, id: HeartId);
    fn clear_targets(&mut self);
}

/// Text projections of the session.
pub trait Scoreboard {
    fn show_score(&mut self, score: u32);
    fn show_time_left(&mut self, seconds: u32);
    /// An empty message clears the output.
    fn show_message(&mut self, message: &str);
}

/// Everything the controller needs from its view.
pub trait GameView: DisplaySurface + Scoreboard {}

impl<T: DisplaySurface + Scoreboard> GameView for T {}
