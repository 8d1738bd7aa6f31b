//! In-memory view used off-browser (native tests, simulations).

use std::collections::BTreeMap;

use super::HeartId;
use super::surface::{Bounds, DisplaySurface, Position, Scoreboard};

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    bounds: Bounds,
    targets: BTreeMap<HeartId, Position>,
    pub renders: usize,
    pub removals: usize,
    pub clears: usize,
    pub score_text: String,
    pub timer_text: String,
    pub message_text: String,
}

impl HeadlessSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Bounds::new(width, height),
            targets: BTreeMap::new(),
            renders: 0,
            removals: 0,
            clears: 0,
            score_text: String::new(),
            timer_text: String::new(),
            message_text: String::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = Bounds::new(width, height);
    }

    pub fn targets(&self) -> &BTreeMap<HeartId, Position> {
        &self.targets
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn has_target(&self, id: HeartId) -> bool {
        self.targets.contains_key(&id)
    }
}

impl DisplaySurface for HeadlessSurface {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn render_target(&mut self, id: HeartId, position: Position, _size: f64) {
        self.renders += 1;
        self.targets.insert(id, position);
    }

    fn remove_target(&mut self, id: HeartId) {
        // only count removals that actually took something off the surface
        if self.targets.remove(&id).is_some() {
            self.removals += 1;
        }
    }

    fn clear_targets(&mut self) {
        self.clears += 1;
        self.targets.clear();
    }
}

impl Scoreboard for HeadlessSurface {
    fn show_score(&mut self, score: u32) {
        self.score_text = score.to_string();
    }

    fn show_time_left(&mut self, seconds: u32) {
        self.timer_text = seconds.to_string();
    }

    fn show_message(&mut self, message: &str) {
        self.message_text = message.to_string();
    }
}
