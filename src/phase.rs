use crate::config::PhaseSpec;
use crate::events::{EventQueue, GameEvent};
use itertools::Itertools;

/// Resolves the active phase index from two independent signals: score
/// thresholds and accumulated phase durations. The index never regresses;
/// whichever signal produces a higher index first wins. Configs mixing both
/// signal kinds across phases get no reconciliation beyond that.
#[derive(Debug, Default)]
pub struct PhaseScheduler {
    current: usize,
    phase_elapsed: f64,
}

impl PhaseScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.phase_elapsed = 0.0;
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Seconds since the current phase was applied.
    pub fn phase_elapsed(&self) -> f64 {
        self.phase_elapsed
    }

    pub fn tick(&mut self, dt: f64) {
        self.phase_elapsed += dt;
    }

    /// Scans phases last to first; the first score-gated phase the score has
    /// reached yields the index after it, clamped to the last index.
    pub fn candidate_from_score(phases: &[PhaseSpec], score: u32) -> usize {
        for (index, phase) in phases.iter().enumerate().rev() {
            if phase.transition_score > 0 && score >= phase.transition_score {
                return (index + 1).min(phases.len() - 1);
            }
        }
        0
    }

    /// The first phase whose cumulative duration exceeds elapsed session
    /// time is the candidate; past the total, the last index. `None` when no
    /// phase carries a positive duration (the time signal is inert for
    /// score-only configs).
    pub fn candidate_from_time(phases: &[PhaseSpec], elapsed: f64) -> Option<usize> {
        if phases.iter().all(|p| p.duration <= 0.0) {
            return None;
        }
        let found = phases
            .iter()
            .scan(0.0, |cumulative, phase| {
                *cumulative += phase.duration;
                Some(*cumulative)
            })
            .find_position(|cumulative| *cumulative > elapsed);
        match found {
            Some((index, _)) => Some(index),
            None => Some(phases.len() - 1),
        }
    }

    /// Runs both checks and advances if either produced a higher index.
    /// Applying a phase resets the phase timer and emits PhaseChanged.
    pub fn evaluate(
        &mut self,
        phases: &[PhaseSpec],
        score: u32,
        elapsed: f64,
        events: &mut EventQueue,
    ) -> bool {
        if phases.is_empty() {
            return false;
        }
        let mut candidate = Self::candidate_from_score(phases, score);
        if let Some(by_time) = Self::candidate_from_time(phases, elapsed) {
            candidate = candidate.max(by_time);
        }
        if candidate > self.current {
            self.current = candidate;
            self.phase_elapsed = 0.0;
            events.push(GameEvent::PhaseChanged(candidate));
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_phase(transition_score: u32) -> PhaseSpec {
        PhaseSpec {
            name: format!("score-{transition_score}"),
            word_group: "easy".into(),
            speed: 0.2,
            spawn_interval: 1.0,
            transition_score,
            duration: 0.0,
        }
    }

    fn time_phase(duration: f64) -> PhaseSpec {
        PhaseSpec {
            name: format!("time-{duration}"),
            word_group: "easy".into(),
            speed: 0.2,
            spawn_interval: 1.0,
            transition_score: 0,
            duration,
        }
    }

    #[test]
    fn test_score_candidate_scans_from_last() {
        let phases = vec![score_phase(100), score_phase(300), score_phase(0)];

        assert_eq!(PhaseScheduler::candidate_from_score(&phases, 0), 0);
        assert_eq!(PhaseScheduler::candidate_from_score(&phases, 100), 1);
        assert_eq!(PhaseScheduler::candidate_from_score(&phases, 299), 1);
        assert_eq!(PhaseScheduler::candidate_from_score(&phases, 300), 2);
        assert_eq!(PhaseScheduler::candidate_from_score(&phases, 9999), 2);
    }

    #[test]
    fn test_score_candidate_monotone_in_score() {
        let phases = vec![score_phase(100), score_phase(300), score_phase(600)];
        let mut previous = 0;
        for score in (0..1000).step_by(50) {
            let index = PhaseScheduler::candidate_from_score(&phases, score);
            assert!(index >= previous, "index regressed at score {score}");
            previous = index;
        }
    }

    #[test]
    fn test_score_candidate_clamped_to_last() {
        let phases = vec![score_phase(100)];
        assert_eq!(PhaseScheduler::candidate_from_score(&phases, 500), 0);
    }

    #[test]
    fn test_time_candidate_cumulative() {
        let phases = vec![time_phase(10.0), time_phase(10.0)];

        assert_eq!(PhaseScheduler::candidate_from_time(&phases, 0.0), Some(0));
        assert_eq!(PhaseScheduler::candidate_from_time(&phases, 9.9), Some(0));
        assert_eq!(PhaseScheduler::candidate_from_time(&phases, 10.0), Some(1));
        assert_eq!(PhaseScheduler::candidate_from_time(&phases, 19.9), Some(1));
        assert_eq!(PhaseScheduler::candidate_from_time(&phases, 25.0), Some(1));
    }

    #[test]
    fn test_time_signal_inert_for_score_only_config() {
        let phases = vec![score_phase(100), score_phase(300)];
        assert_eq!(PhaseScheduler::candidate_from_time(&phases, 50.0), None);
    }

    #[test]
    fn test_evaluate_advances_and_never_regresses() {
        let phases = vec![time_phase(10.0), time_phase(10.0)];
        let mut scheduler = PhaseScheduler::new();
        let mut events = EventQueue::new();

        assert!(!scheduler.evaluate(&phases, 0, 5.0, &mut events));
        assert_eq!(scheduler.current_index(), 0);

        assert!(scheduler.evaluate(&phases, 0, 10.5, &mut events));
        assert_eq!(scheduler.current_index(), 1);
        assert!(events.drain().contains(&GameEvent::PhaseChanged(1)));

        // Earlier elapsed must not regress the index.
        assert!(!scheduler.evaluate(&phases, 0, 3.0, &mut events));
        assert_eq!(scheduler.current_index(), 1);
    }

    #[test]
    fn test_evaluate_resets_phase_timer() {
        let phases = vec![time_phase(10.0), time_phase(10.0)];
        let mut scheduler = PhaseScheduler::new();
        let mut events = EventQueue::new();

        scheduler.tick(10.5);
        assert!(scheduler.evaluate(&phases, 0, 10.5, &mut events));
        assert_eq!(scheduler.phase_elapsed(), 0.0);
    }

    #[test]
    fn test_score_trigger_through_evaluate() {
        let phases = vec![score_phase(100), score_phase(300), score_phase(0)];
        let mut scheduler = PhaseScheduler::new();
        let mut events = EventQueue::new();

        assert!(scheduler.evaluate(&phases, 150, 0.0, &mut events));
        assert_eq!(scheduler.current_index(), 1);

        assert!(scheduler.evaluate(&phases, 400, 0.0, &mut events));
        assert_eq!(scheduler.current_index(), 2);
    }
}
