//! Index-based work queue of particles.
//!
//! [`ParticleStack`] hands out positions, never iterators that outlive a
//! mutation. The engine re-scans from the front after every insertion or
//! removal, so no position is ever held across a change to the stack.

use std::collections::VecDeque;

use smallvec::SmallVec;

use simprop_core::Particle;

#[derive(Clone, Debug, PartialEq)]
struct Slot {
    particle: Particle,
    quarantined: bool,
}

/// Ordered, double-ended collection of particles awaiting propagation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleStack {
    slots: VecDeque<Slot>,
}

impl ParticleStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a particle at the back.
    pub fn push_back(&mut self, particle: Particle) {
        self.slots.push_back(Slot {
            particle,
            quarantined: false,
        });
    }

    /// Insert `particles` at the front, keeping their relative order.
    pub fn push_front_all<I>(&mut self, particles: I)
    where
        I: IntoIterator<Item = Particle>,
    {
        let incoming: SmallVec<[Particle; 4]> = particles.into_iter().collect();
        for particle in incoming.into_iter().rev() {
            self.slots.push_front(Slot {
                particle,
                quarantined: false,
            });
        }
    }

    /// Remove and return the particle at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Particle> {
        self.slots.remove(index).map(|s| s.particle)
    }

    /// Particle at `index`.
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.slots.get(index).map(|s| &s.particle)
    }

    /// Mutable particle at `index`, for in-place continuous updates.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.slots.get_mut(index).map(|s| &mut s.particle)
    }

    /// Number of particles, active or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the stack holds no particles.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Particles front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.slots.iter().map(|s| &s.particle)
    }

    /// Position of the first non-quarantined particle satisfying `active`.
    pub fn first_active<F>(&self, active: F) -> Option<usize>
    where
        F: Fn(&Particle) -> bool,
    {
        self.slots
            .iter()
            .position(|s| !s.quarantined && active(&s.particle))
    }

    /// Number of non-quarantined particles satisfying `active`.
    pub fn count_active<F>(&self, active: F) -> usize
    where
        F: Fn(&Particle) -> bool,
    {
        self.slots
            .iter()
            .filter(|s| !s.quarantined && active(&s.particle))
            .count()
    }

    /// Exclude the particle at `index` from every later scan. Returns
    /// `false` if `index` is out of range.
    pub fn quarantine(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.quarantined = true;
                true
            }
            None => false,
        }
    }

    /// Whether the particle at `index` has been quarantined.
    pub fn is_quarantined(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.quarantined)
    }

    /// Number of quarantined particles.
    pub fn quarantined_count(&self) -> usize {
        self.slots.iter().filter(|s| s.quarantined).count()
    }
}

impl FromIterator<Particle> for ParticleStack {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        let mut stack = Self::new();
        for p in iter {
            stack.push_back(p);
        }
        stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simprop_core::Pid;

    fn p(gamma: f64) -> Particle {
        Particle::new(Pid::PROTON, 1.0, gamma)
    }

    #[test]
    fn push_front_all_preserves_order() {
        let mut s: ParticleStack = [p(1.0), p(2.0)].into_iter().collect();
        s.push_front_all([p(10.0), p(20.0), p(30.0)]);
        let gammas: Vec<f64> = s.iter().map(|x| x.gamma).collect();
        assert_eq!(gammas, vec![10.0, 20.0, 30.0, 1.0, 2.0]);
    }

    #[test]
    fn remove_shifts_later_positions() {
        let mut s: ParticleStack = [p(1.0), p(2.0), p(3.0)].into_iter().collect();
        assert_eq!(s.remove(1), Some(p(2.0)));
        assert_eq!(s.get(1), Some(&p(3.0)));
        assert_eq!(s.len(), 2);
        assert_eq!(s.remove(5), None);
    }

    #[test]
    fn first_active_skips_inactive_and_quarantined() {
        let mut s: ParticleStack = [p(1.0), p(5.0), p(6.0)].into_iter().collect();
        let active = |x: &Particle| x.gamma > 2.0;
        assert_eq!(s.first_active(active), Some(1));
        assert!(s.quarantine(1));
        assert_eq!(s.first_active(active), Some(2));
        assert_eq!(s.count_active(active), 1);
        assert!(s.is_quarantined(1));
        assert_eq!(s.quarantined_count(), 1);
    }

    #[test]
    fn quarantine_out_of_range() {
        let mut s = ParticleStack::new();
        assert!(!s.quarantine(0));
        assert!(s.is_empty());
        assert_eq!(s.first_active(|_| true), None);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut s: ParticleStack = [p(1.0)].into_iter().collect();
        if let Some(x) = s.get_mut(0) {
            x.gamma = 0.5;
        }
        assert_eq!(s.get(0).map(|x| x.gamma), Some(0.5));
    }
}
