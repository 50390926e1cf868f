use crate::words::WordRecord;
use rand::Rng;

/// Cosmetic fade applied when a word is cleared; no gameplay effect.
pub const SUCCESS_FADE_SECS: f64 = 0.35;

/// Lifecycle of a pooled slot. Every deactivation passes through Retiring;
/// failures carry a zero fade and are swept out in the same tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityState {
    Inactive,
    Moving,
    Targeted,
    Retiring,
}

/// A recyclable on-screen word carrier. Owned exclusively by the pool;
/// other components read its state but never mutate it.
#[derive(Debug, Clone)]
pub struct WordEntity {
    pub state: EntityState,
    /// Progress along the path: 0.0 at the spawn edge, 1.0 at the exit.
    pub position: f64,
    /// Fixed lateral offset assigned at spawn.
    pub lateral: f64,
    pub word: Option<WordRecord>,
    pub fade_remaining: f64,
}

impl WordEntity {
    fn idle() -> Self {
        Self {
            state: EntityState::Inactive,
            position: 0.0,
            lateral: 0.0,
            word: None,
            fade_remaining: 0.0,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, EntityState::Moving | EntityState::Targeted)
    }

    fn activate(&mut self, word: WordRecord, lateral: f64) {
        self.state = EntityState::Moving;
        self.position = 0.0;
        self.lateral = lateral;
        self.word = Some(word);
        self.fade_remaining = 0.0;
    }

    fn begin_retire(&mut self, fade: f64) {
        self.state = EntityState::Retiring;
        self.fade_remaining = fade;
    }

    fn deactivate(&mut self) {
        self.state = EntityState::Inactive;
        self.position = 0.0;
        self.word = None;
        self.fade_remaining = 0.0;
    }
}

/// What one movement pass observed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Entities that crossed the exit boundary this tick (failures).
    pub expired: usize,
    /// Whether the targeted entity was among them.
    pub target_expired: bool,
}

/// Growable pool of word entities plus the spawn timer. The pool is the
/// only mutator of its slots.
#[derive(Debug)]
pub struct EntityPool {
    slots: Vec<WordEntity>,
    spawn_timer: f64,
    max_live: usize,
    lateral_band: f64,
}

impl EntityPool {
    pub fn new(max_live: usize, lateral_band: f64) -> Self {
        Self {
            slots: (0..max_live).map(|_| WordEntity::idle()).collect(),
            // Ready immediately so the first Playing tick spawns.
            spawn_timer: 0.0,
            max_live,
            lateral_band,
        }
    }

    pub fn slots(&self) -> &[WordEntity] {
        &self.slots
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|e| e.is_live()).count()
    }

    pub fn has_capacity(&self) -> bool {
        self.live_count() < self.max_live
    }

    fn target_index(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|e| e.state == EntityState::Targeted)
    }

    pub fn target(&self) -> Option<&WordEntity> {
        self.target_index().map(|i| &self.slots[i])
    }

    /// Advances live entities by `speed * dt`. Entities crossing the exit
    /// boundary fail: they enter Retiring with zero fade and are deactivated
    /// by the same tick's sweep.
    pub fn advance(&mut self, dt: f64, speed: f64) -> TickReport {
        let mut report = TickReport::default();
        for entity in &mut self.slots {
            if !entity.is_live() {
                continue;
            }
            entity.position += speed * dt;
            if entity.position >= 1.0 {
                if entity.state == EntityState::Targeted {
                    report.target_expired = true;
                }
                entity.begin_retire(0.0);
                report.expired += 1;
            }
        }
        report
    }

    /// Counts down retiring fades and frees finished slots.
    pub fn sweep_retiring(&mut self, dt: f64) {
        for entity in &mut self.slots {
            if entity.state == EntityState::Retiring {
                entity.fade_remaining -= dt;
                if entity.fade_remaining <= 0.0 {
                    entity.deactivate();
                }
            }
        }
    }

    /// Counts the spawn timer down; true once it has elapsed. The timer
    /// stays due until `reset_spawn_timer`, so a spawn skipped at the
    /// concurrency cap fires as soon as capacity frees up.
    pub fn spawn_ready(&mut self, dt: f64) -> bool {
        self.spawn_timer = (self.spawn_timer - dt).max(0.0);
        self.spawn_timer <= 0.0
    }

    pub fn reset_spawn_timer(&mut self, interval: f64) {
        self.spawn_timer = interval;
    }

    /// Activates an inactive slot with the given word, growing the pool when
    /// every slot is busy. Pool pressure never fails a spawn.
    pub fn spawn(&mut self, word: WordRecord, rng: &mut impl Rng) {
        let lateral = if self.lateral_band > 0.0 {
            rng.gen_range(-self.lateral_band..=self.lateral_band)
        } else {
            0.0
        };
        match self.slots.iter_mut().find(|e| e.state == EntityState::Inactive) {
            Some(slot) => slot.activate(word, lateral),
            None => {
                let mut slot = WordEntity::idle();
                slot.activate(word, lateral);
                self.slots.push(slot);
            }
        }
    }

    /// Promotes the most-advanced Moving entity to Targeted and returns its
    /// word. No-op while a target exists; the caller retires the old target
    /// first, which keeps the single-target invariant.
    pub fn select_target(&mut self) -> Option<WordRecord> {
        if self.target_index().is_some() {
            return None;
        }
        let candidate = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, e)| e.state == EntityState::Moving)
            .max_by(|(_, a), (_, b)| a.position.total_cmp(&b.position))
            .map(|(i, _)| i)?;
        self.slots[candidate].state = EntityState::Targeted;
        self.slots[candidate].word.clone()
    }

    /// Retires the targeted entity through the success fade and returns its
    /// word.
    pub fn complete_target(&mut self) -> Option<WordRecord> {
        let index = self.target_index()?;
        let word = self.slots[index].word.clone();
        self.slots[index].begin_retire(SUCCESS_FADE_SECS);
        word
    }

    /// Force-retires every live or fading entity without running the fade.
    /// Used on transitions to Title/Result.
    pub fn clear_all(&mut self) {
        for entity in &mut self.slots {
            if entity.state != EntityState::Inactive {
                entity.begin_retire(0.0);
                entity.deactivate();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn word(target: &str) -> WordRecord {
        WordRecord {
            target: target.into(),
            display: target.into(),
            score_value: 10,
        }
    }

    fn pool() -> EntityPool {
        EntityPool::new(3, 0.5)
    }

    #[test]
    fn test_new_pool_is_idle() {
        let pool = pool();
        assert_eq!(pool.slots().len(), 3);
        assert_eq!(pool.live_count(), 0);
        assert!(pool.target().is_none());
        assert!(pool.has_capacity());
    }

    #[test]
    fn test_spawn_activates_slot() {
        let mut pool = pool();
        pool.spawn(word("cat"), &mut thread_rng());

        assert_eq!(pool.live_count(), 1);
        let entity = pool.slots().iter().find(|e| e.is_live()).unwrap();
        assert_eq!(entity.state, EntityState::Moving);
        assert_eq!(entity.position, 0.0);
        assert!(entity.lateral.abs() <= 0.5);
        assert_eq!(entity.word.as_ref().unwrap().target, "cat");
    }

    #[test]
    fn test_pool_grows_under_pressure() {
        let mut pool = pool();
        let mut rng = thread_rng();
        for i in 0..5 {
            pool.spawn(word(&format!("w{i}")), &mut rng);
        }
        assert_eq!(pool.live_count(), 5);
        assert!(pool.slots().len() >= 5);
    }

    #[test]
    fn test_spawn_timer_stays_due_until_reset() {
        let mut pool = pool();
        pool.reset_spawn_timer(1.0);

        assert!(!pool.spawn_ready(0.4));
        assert!(!pool.spawn_ready(0.4));
        assert!(pool.spawn_ready(0.4));
        // Still due on the next tick until reset.
        assert!(pool.spawn_ready(0.1));

        pool.reset_spawn_timer(1.0);
        assert!(!pool.spawn_ready(0.1));
    }

    #[test]
    fn test_advance_moves_and_expires() {
        let mut pool = pool();
        pool.spawn(word("cat"), &mut thread_rng());

        let report = pool.advance(0.5, 1.0);
        assert_eq!(report, TickReport::default());
        assert_eq!(pool.slots()[0].position, 0.5);

        let report = pool.advance(0.6, 1.0);
        assert_eq!(report.expired, 1);
        assert!(!report.target_expired);
        assert_eq!(pool.slots()[0].state, EntityState::Retiring);

        // Zero-fade failure frees the slot in the same tick's sweep.
        pool.sweep_retiring(0.0);
        assert_eq!(pool.slots()[0].state, EntityState::Inactive);
        assert!(pool.slots()[0].word.is_none());
    }

    #[test]
    fn test_targeted_expiry_reported() {
        let mut pool = pool();
        pool.spawn(word("cat"), &mut thread_rng());
        pool.select_target().unwrap();

        let report = pool.advance(2.0, 1.0);
        assert!(report.target_expired);
        assert!(pool.target().is_none());
    }

    #[test]
    fn test_select_target_prefers_most_advanced() {
        let mut pool = pool();
        let mut rng = thread_rng();
        pool.spawn(word("near"), &mut rng);
        pool.advance(0.6, 1.0); // "near" at 0.6
        pool.spawn(word("far"), &mut rng);

        let target = pool.select_target().unwrap();
        assert_eq!(target.target, "near");
        assert_eq!(pool.target().unwrap().position, 0.6);
    }

    #[test]
    fn test_single_target_invariant() {
        let mut pool = pool();
        let mut rng = thread_rng();
        pool.spawn(word("a"), &mut rng);
        pool.spawn(word("b"), &mut rng);

        assert!(pool.select_target().is_some());
        assert!(pool.select_target().is_none());

        let targeted = pool
            .slots()
            .iter()
            .filter(|e| e.state == EntityState::Targeted)
            .count();
        assert_eq!(targeted, 1);
    }

    #[test]
    fn test_complete_target_fades() {
        let mut pool = pool();
        pool.spawn(word("cat"), &mut thread_rng());
        pool.select_target().unwrap();

        let cleared = pool.complete_target().unwrap();
        assert_eq!(cleared.target, "cat");
        assert_eq!(pool.slots()[0].state, EntityState::Retiring);
        assert_eq!(pool.slots()[0].fade_remaining, SUCCESS_FADE_SECS);

        // Fade is bounded; slot frees once it runs out.
        pool.sweep_retiring(SUCCESS_FADE_SECS / 2.0);
        assert_eq!(pool.slots()[0].state, EntityState::Retiring);
        pool.sweep_retiring(SUCCESS_FADE_SECS);
        assert_eq!(pool.slots()[0].state, EntityState::Inactive);
    }

    #[test]
    fn test_retarget_after_completion() {
        let mut pool = pool();
        let mut rng = thread_rng();
        pool.spawn(word("a"), &mut rng);
        pool.spawn(word("b"), &mut rng);
        pool.select_target().unwrap();
        pool.complete_target().unwrap();

        // Old target retired first, then the survivor is promoted.
        let next = pool.select_target().unwrap();
        assert!(next.target == "a" || next.target == "b");
        assert_eq!(pool.live_count(), 1);
    }

    #[test]
    fn test_clear_all_skips_fade() {
        let mut pool = pool();
        let mut rng = thread_rng();
        pool.spawn(word("a"), &mut rng);
        pool.spawn(word("b"), &mut rng);
        pool.select_target().unwrap();
        pool.complete_target().unwrap();

        pool.clear_all();
        assert_eq!(pool.live_count(), 0);
        assert!(pool
            .slots()
            .iter()
            .all(|e| e.state == EntityState::Inactive && e.word.is_none()));
    }
}
