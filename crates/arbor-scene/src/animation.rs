// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Time-driven animation parameters.
//!
//! An articulated object exposes a fixed number of parameters. Each parameter
//! is a function of its own time value, and applying it usually rewrites one or
//! more transform entries through [`TransformHandle`]s.

use crate::error::{SceneError, SceneResult};
use crate::graph::SceneGraph;
use crate::handle::TransformHandle;
use arbor_core::Mat4;

/// Seconds added to a parameter's time by one unit of [`Animator::nudge`].
pub const NUDGE_STEP_SECONDS: f32 = 0.1;

/// Something with animatable parameters.
pub trait ParameterDriver {
    /// Number of parameters.
    fn parameter_count(&self) -> usize;

    /// Brings parameter `index` to its state at `time` seconds.
    ///
    /// `index` is always below [`parameter_count`](Self::parameter_count).
    fn apply(&mut self, graph: &mut SceneGraph, index: usize, time: f32) -> SceneResult<()>;
}

/// Keeps one time accumulator per parameter of a [`ParameterDriver`] and an
/// active parameter for interactive editing.
#[derive(Debug)]
pub struct Animator<D> {
    driver: D,
    times: Vec<f32>,
    active: usize,
}

impl<D: ParameterDriver> Animator<D> {
    /// Wraps a driver, with every parameter at time zero.
    ///
    /// Nothing is applied until the first call that changes a time.
    pub fn new(driver: D) -> Self {
        let times = vec![0.0; driver.parameter_count()];
        Self {
            driver,
            times,
            active: 0,
        }
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Number of parameters.
    pub fn parameter_count(&self) -> usize {
        self.times.len()
    }

    /// The current time of a parameter.
    pub fn time(&self, index: usize) -> Option<f32> {
        self.times.get(index).copied()
    }

    /// The active parameter, or `None` when there are no parameters.
    pub fn active(&self) -> Option<usize> {
        (!self.times.is_empty()).then_some(self.active)
    }

    /// Advances every parameter by `dt` seconds and applies them all.
    pub fn advance(&mut self, graph: &mut SceneGraph, dt: f32) -> SceneResult<()> {
        for index in 0..self.times.len() {
            self.times[index] += dt;
            self.driver.apply(graph, index, self.times[index])?;
        }
        Ok(())
    }

    /// Moves one parameter by `delta` steps of [`NUDGE_STEP_SECONDS`] and
    /// applies it.
    pub fn nudge(&mut self, graph: &mut SceneGraph, index: usize, delta: i32) -> SceneResult<()> {
        let count = self.times.len();
        let time = self
            .times
            .get_mut(index)
            .ok_or(SceneError::ParameterOutOfRange { index, count })?;
        *time += delta as f32 * NUDGE_STEP_SECONDS;
        let time = *time;
        self.driver.apply(graph, index, time)
    }

    /// [`nudge`](Self::nudge) applied to the active parameter.
    pub fn nudge_active(&mut self, graph: &mut SceneGraph, delta: i32) -> SceneResult<()> {
        self.nudge(graph, self.active, delta)
    }

    /// Moves the active parameter by `step` positions, wrapping around.
    pub fn cycle_active(&mut self, step: i32) {
        let count = self.times.len();
        if count == 0 {
            log::warn!("Cannot change the active parameter: there are no parameters");
            return;
        }
        self.active = (self.active as i64 + step as i64).rem_euclid(count as i64) as usize;
        log::info!("Active parameter is now {} / {}", self.active + 1, count);
    }

    /// Sets every parameter back to time zero and applies them all.
    pub fn reset(&mut self, graph: &mut SceneGraph) -> SceneResult<()> {
        self.times.fill(0.0);
        for index in 0..self.times.len() {
            self.driver.apply(graph, index, 0.0)?;
        }
        Ok(())
    }
}

/// A parameter that rewrites one transform entry from a curve of time.
pub struct TransformTrack {
    name: String,
    handle: TransformHandle,
    curve: Box<dyn Fn(f32) -> Mat4>,
}

impl TransformTrack {
    /// Binds `curve` to the transform behind `handle`.
    pub fn new(
        name: impl Into<String>,
        handle: TransformHandle,
        curve: impl Fn(f32) -> Mat4 + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            handle,
            curve: Box::new(curve),
        }
    }

    /// The track's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The transform this track drives.
    pub fn handle(&self) -> TransformHandle {
        self.handle
    }

    /// Evaluates the curve at `time` and writes it to the transform.
    pub fn apply(&self, graph: &mut SceneGraph, time: f32) -> SceneResult<()> {
        graph.set_transform(self.handle, (self.curve)(time))
    }
}

impl std::fmt::Debug for TransformTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformTrack")
            .field("name", &self.name)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

/// A [`ParameterDriver`] whose parameters are [`TransformTrack`]s.
#[derive(Debug, Default)]
pub struct TrackSet {
    tracks: Vec<TransformTrack>,
}

impl TrackSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a track as the next parameter and returns its index.
    pub fn push(&mut self, track: TransformTrack) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// The tracks, in parameter order.
    pub fn tracks(&self) -> &[TransformTrack] {
        &self.tracks
    }
}

impl ParameterDriver for TrackSet {
    fn parameter_count(&self) -> usize {
        self.tracks.len()
    }

    fn apply(&mut self, graph: &mut SceneGraph, index: usize, time: f32) -> SceneResult<()> {
        let count = self.tracks.len();
        self.tracks
            .get(index)
            .ok_or(SceneError::ParameterOutOfRange { index, count })?
            .apply(graph, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arbor_core::Vec3;

    fn slider(graph: &mut SceneGraph) -> (TrackSet, TransformHandle) {
        let node = graph.add_node("slider");
        let t = graph.add_transform(node, Mat4::IDENTITY).unwrap();
        let handle = graph.transform_handle(node, t).unwrap();

        let mut tracks = TrackSet::new();
        tracks.push(TransformTrack::new("slide", handle, |t| {
            Mat4::from_translation(Vec3::new(t, 0.0, 0.0))
        }));
        tracks.push(TransformTrack::new("idle", handle, |_| Mat4::IDENTITY));
        (tracks, handle)
    }

    fn offset(graph: &SceneGraph, handle: TransformHandle) -> f32 {
        graph.transform(handle).unwrap().cols[3].x
    }

    #[test]
    fn test_nudge_steps_a_tenth_of_a_second() {
        let mut graph = SceneGraph::new();
        let (tracks, handle) = slider(&mut graph);
        let mut animator = Animator::new(tracks);

        animator.nudge(&mut graph, 0, 3).unwrap();
        assert_relative_eq!(animator.time(0).unwrap(), 0.3);
        assert_relative_eq!(offset(&graph, handle), 0.3);

        animator.nudge(&mut graph, 0, -1).unwrap();
        assert_relative_eq!(offset(&graph, handle), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_nudge_out_of_range() {
        let mut graph = SceneGraph::new();
        let (tracks, _) = slider(&mut graph);
        let mut animator = Animator::new(tracks);
        assert!(matches!(
            animator.nudge(&mut graph, 2, 1),
            Err(SceneError::ParameterOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_advance_then_reset() {
        let mut graph = SceneGraph::new();
        let node = graph.add_node("slider");
        let t = graph.add_transform(node, Mat4::IDENTITY).unwrap();
        let handle = graph.transform_handle(node, t).unwrap();
        let mut tracks = TrackSet::new();
        tracks.push(TransformTrack::new("slide", handle, |t| {
            Mat4::from_translation(Vec3::new(t, 0.0, 0.0))
        }));
        let mut animator = Animator::new(tracks);

        animator.advance(&mut graph, 0.5).unwrap();
        animator.advance(&mut graph, 0.25).unwrap();
        assert_relative_eq!(offset(&graph, handle), 0.75);

        animator.reset(&mut graph).unwrap();
        assert_eq!(animator.time(0), Some(0.0));
        assert_eq!(*graph.transform(handle).unwrap(), Mat4::IDENTITY);
    }

    #[test]
    fn test_cycle_active_wraps_both_ways() {
        let mut graph = SceneGraph::new();
        let (tracks, _) = slider(&mut graph);
        let mut animator = Animator::new(tracks);

        assert_eq!(animator.active(), Some(0));
        animator.cycle_active(-1);
        assert_eq!(animator.active(), Some(1));
        animator.cycle_active(1);
        assert_eq!(animator.active(), Some(0));
        animator.cycle_active(5);
        assert_eq!(animator.active(), Some(1));
    }

    #[test]
    fn test_cycle_without_parameters_is_a_no_op() {
        let mut animator = Animator::new(TrackSet::new());
        animator.cycle_active(1);
        assert_eq!(animator.active(), None);
    }
}
