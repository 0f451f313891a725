//! Fixed-capacity projectile pool.
//!
//! Slots are recycled rather than freed. Every activation bumps the slot's
//! generation, so a handle taken for an earlier shot no longer matches once
//! the slot has been reused.

use glam::Vec2;

use crate::physics::Body;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectileId {
    pub slot: usize,
    pub generation: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub active: bool,
    pub generation: u32,
}

#[derive(Clone, Debug)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(capacity: usize, size: Vec2) -> Self {
        let idle = Projectile {
            body: Body::new(Vec2::ZERO, size),
            active: false,
            generation: 0,
        };
        Self {
            slots: vec![idle; capacity],
        }
    }

    /// Activate the first idle slot. `None` when every slot is in flight.
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2) -> Option<ProjectileId> {
        let slot = self.slots.iter().position(|p| !p.active)?;
        let projectile = &mut self.slots[slot];
        projectile.generation = projectile.generation.wrapping_add(1);
        projectile.active = true;
        projectile.body.pos = pos;
        projectile.body.vel = vel;
        Some(ProjectileId {
            slot,
            generation: projectile.generation,
        })
    }

    /// Deactivate the shot `id` refers to. Returns false if that shot is
    /// already gone.
    pub fn release(&mut self, id: ProjectileId) -> bool {
        match self.slots.get_mut(id.slot) {
            Some(p) if p.active && p.generation == id.generation => {
                p.active = false;
                p.body.vel = Vec2::ZERO;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.slots
            .get(id.slot)
            .filter(|p| p.active && p.generation == id.generation)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (ProjectileId, &Projectile)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.active).map(|(slot, p)| {
            (
                ProjectileId {
                    slot,
                    generation: p.generation,
                },
                p,
            )
        })
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.slots.iter_mut().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }
}
