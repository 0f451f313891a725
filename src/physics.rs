//! Minimal arcade physics: gravity, velocity integration, one-way platform
//! landing, world clamping and AABB overlap. Coordinates are pixels with y
//! pointing down; body positions are centres.

use glam::Vec2;

/// Tolerance when deciding whether a body was above a platform last step.
const LANDING_SLOP: f32 = 1.0;

/// Bounced bodies settle once the rebound drops below this speed.
const SETTLE_SPEED: f32 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Edges touching do not count as an overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub gravity: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            gravity: false,
        }
    }

    pub fn with_gravity(mut self) -> Self {
        self.gravity = true;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Semi-implicit Euler step.
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        if self.gravity {
            self.vel.y += gravity * dt;
        }
        self.pos += self.vel * dt;
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.aabb().overlaps(&other.aabb())
    }
}

/// Land `body` on the first platform it crossed from above during the last
/// step. Platforms are only solid while the body is falling.
///
/// Returns true when the body ended the step standing on a platform.
pub fn land_on_platforms(body: &mut Body, prev_bottom: f32, platforms: &[Aabb], bounce: f32) -> bool {
    if body.vel.y <= 0.0 {
        return false;
    }
    let half_w = body.size.x / 2.0;
    let bottom = body.bottom();
    for top in platforms {
        let horizontal = body.pos.x + half_w > top.min.x && body.pos.x - half_w < top.max.x;
        if horizontal && prev_bottom <= top.min.y + LANDING_SLOP && bottom >= top.min.y {
            body.pos.y = top.min.y - body.size.y / 2.0;
            let rebound = body.vel.y * bounce;
            body.vel.y = if rebound < SETTLE_SPEED { 0.0 } else { -rebound };
            return true;
        }
    }
    false
}

/// Keep a body inside `[0, width]` horizontally, stopping it at the wall.
pub fn clamp_x(body: &mut Body, width: f32) {
    let half_w = body.size.x / 2.0;
    let clamped = body.pos.x.clamp(half_w, (width - half_w).max(half_w));
    if clamped != body.pos.x {
        body.pos.x = clamped;
        body.vel.x = 0.0;
    }
}

/// Keep a body inside `[0, floor]` vertically.
pub fn clamp_y(body: &mut Body, floor: f32) {
    let half_h = body.size.y / 2.0;
    if body.pos.y - half_h < 0.0 {
        body.pos.y = half_h;
        body.vel.y = body.vel.y.max(0.0);
    } else if body.pos.y + half_h > floor {
        body.pos.y = floor - half_h;
        body.vel.y = body.vel.y.min(0.0);
    }
}
