// Projectiles and the fixed-capacity pool each tank fires from.

use super::angle::heading_vector;
use super::tank::TankId;
use glam::Vec2;

/// Stable reference to a pooled projectile.
///
/// A handle stays valid until its projectile is released; after that the slot
/// may be reused and the old handle no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileHandle {
    slot: usize,
    generation: u32,
}

impl ProjectileHandle {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A moving point with a fixed heading, fired by one tank.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Degrees, 0 = up.
    pub heading: f32,
    /// Units per second.
    pub speed: f32,
    /// Back-reference to the firing tank. The pool owns the projectile, not the tank id.
    pub owner: TankId,
}

impl Projectile {
    pub fn velocity(&self) -> Vec2 {
        heading_vector(self.heading) * self.speed
    }

    /// Commits a position computed by the physics stepper.
    pub fn advance(&mut self, position: Vec2) {
        self.position = position;
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    projectile: Option<Projectile>,
}

/// Bounded set of live projectiles for a single owner.
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Slot>,
    active: usize,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn is_full(&self) -> bool {
        self.active >= self.slots.len()
    }

    /// Inserts a projectile into the first free slot.
    ///
    /// Returns `None` and leaves the pool untouched when it is full.
    pub fn try_spawn(&mut self, projectile: Projectile) -> Option<ProjectileHandle> {
        let (slot, entry) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, entry)| entry.projectile.is_none())?;

        entry.projectile = Some(projectile);
        self.active += 1;
        Some(ProjectileHandle {
            slot,
            generation: entry.generation,
        })
    }

    /// Removes a projectile from the active set.
    ///
    /// Releasing a stale or already released handle is a no-op and returns false.
    pub fn release(&mut self, handle: ProjectileHandle) -> bool {
        let Some(entry) = self.slots.get_mut(handle.slot) else {
            return false;
        };
        if entry.generation != handle.generation || entry.projectile.is_none() {
            return false;
        }

        entry.projectile = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.active -= 1;
        true
    }

    /// Releases every live projectile, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let released = self.active;
        for entry in self.slots.iter_mut().filter(|e| e.projectile.is_some()) {
            entry.projectile = None;
            entry.generation = entry.generation.wrapping_add(1);
        }
        self.active = 0;
        released
    }

    pub fn get(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        self.slots
            .get(handle.slot)
            .filter(|entry| entry.generation == handle.generation)
            .and_then(|entry| entry.projectile.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectileHandle, &Projectile)> {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            entry.projectile.as_ref().map(|p| {
                (
                    ProjectileHandle {
                        slot,
                        generation: entry.generation,
                    },
                    p,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ProjectileHandle, &mut Projectile)> {
        self.slots.iter_mut().enumerate().filter_map(|(slot, entry)| {
            let generation = entry.generation;
            entry
                .projectile
                .as_mut()
                .map(|p| (ProjectileHandle { slot, generation }, p))
        })
    }
}
