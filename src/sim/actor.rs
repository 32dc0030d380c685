//! Player and enemy actors
//!
//! Bodies are owned by the simulation; the external physics integrator reads
//! `vel`, writes back `pos` (and the player's `on_ground`), and skips bodies
//! that are disabled.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Horizontal facing; there is no neutral facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing from a horizontal displacement; zero counts as left
    #[inline]
    pub fn toward(dx: f32) -> Self {
        if dx > 0.0 { Facing::Right } else { Facing::Left }
    }
}

/// Physical presence shared by every actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Disabled bodies are invisible to physics and to every query
    pub enabled: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(size),
            enabled: true,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Re-enable at `pos`, at rest
    pub fn enable_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.enabled = true;
    }
}

/// Read access shared by the perception and lookahead queries
pub trait Actor {
    fn body(&self) -> &Body;
    fn facing(&self) -> Facing;

    #[inline]
    fn position(&self) -> Vec2 {
        self.body().pos
    }

    /// Alive and physically present
    #[inline]
    fn is_active(&self) -> bool {
        self.body().enabled
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    /// Fast-fall is engaged (down held while airborne)
    pub fast_falling: bool,
    /// Touching ground below, written by the physics integrator
    pub on_ground: bool,
}

impl Player {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            body: Body::new(pos, size),
            facing: Facing::Right,
            fast_falling: false,
            on_ground: false,
        }
    }
}

impl Actor for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn facing(&self) -> Facing {
        self.facing
    }
}

/// Stable enemy handle (index into the world's enemy list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Enemy behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyState {
    /// Walk back and forth, turning at walls and ledges
    #[default]
    Patrol,
    /// Move toward the player while it stays in sight
    Chase,
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub body: Body,
    pub facing: Facing,
    pub state: EnemyState,
    /// Facing chosen at spawn, restored on respawn
    pub initial_facing: Facing,
    pub spawn: Vec2,
}

impl Enemy {
    pub fn new(id: EnemyId, spawn: Vec2, facing: Facing, size: f32) -> Self {
        Self {
            id,
            body: Body::new(spawn, size),
            facing,
            state: EnemyState::Patrol,
            initial_facing: facing,
            spawn,
        }
    }

    /// Walk in the current facing at `speed`
    #[inline]
    pub fn walk(&mut self, speed: f32) {
        self.body.vel.x = self.facing.sign() * speed;
    }

    /// Back to spawn: enabled, patrolling, initial facing
    pub fn reset(&mut self, patrol_speed: f32) {
        self.body.enable_at(self.spawn);
        self.state = EnemyState::Patrol;
        self.facing = self.initial_facing;
        self.walk(patrol_speed);
    }
}

impl Actor for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn facing(&self) -> Facing {
        self.facing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_sign_and_flip() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::Left.flipped(), Facing::Right);
        assert_eq!(Facing::toward(0.0), Facing::Left);
        assert_eq!(Facing::toward(0.1), Facing::Right);
    }

    #[test]
    fn test_enemy_reset_restores_spawn_state() {
        let spawn = Vec2::new(500.0, 300.0);
        let mut enemy = Enemy::new(EnemyId(0), spawn, Facing::Left, 50.0);
        enemy.body.pos = Vec2::new(900.0, 310.0);
        enemy.body.disable();
        enemy.facing = Facing::Right;
        enemy.state = EnemyState::Chase;

        enemy.reset(150.0);

        assert!(enemy.is_active());
        assert_eq!(enemy.position(), spawn);
        assert_eq!(enemy.state, EnemyState::Patrol);
        assert_eq!(enemy.facing, Facing::Left);
        assert_eq!(enemy.body.vel, Vec2::new(-150.0, 0.0));
    }

    #[test]
    fn test_body_bounds_centered() {
        let body = Body::new(Vec2::new(100.0, 100.0), 50.0);
        let b = body.bounds();
        assert_eq!(b.min, Vec2::new(75.0, 75.0));
        assert_eq!(b.max, Vec2::new(125.0, 125.0));
        assert_eq!(body.half_width(), 25.0);
    }
}
