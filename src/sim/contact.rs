//! Contact events
//!
//! The physics integrator owns collision detection and reports what touched
//! what as a list of [`Contact`]s each step. [`detect_contacts`] produces the
//! same list from plain box overlaps for hosts without a physics engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::EnemyId;
use super::rect::Rect;
use super::state::World;

/// A reported overlap between two things
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    PlayerEnemy(EnemyId),
    PlayerHazard,
    EnemyHazard(EnemyId),
    /// Index into `World::checkpoints`
    PlayerCheckpoint(usize),
}

/// Box-overlap scan over every enabled actor
pub fn detect_contacts(world: &World) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let geometry = &world.geometry;

    if world.player.body.enabled {
        let player = world.player.body.bounds();

        if geometry.hazard_overlaps(&player) {
            contacts.push(Contact::PlayerHazard);
        }

        contacts.extend(
            world
                .enemies
                .iter()
                .filter(|e| e.body.enabled && e.body.bounds().overlaps(&player))
                .map(|e| Contact::PlayerEnemy(e.id)),
        );

        let cp_size = Vec2::splat(world.tuning.checkpoint_size);
        contacts.extend(
            world
                .checkpoints
                .iter()
                .enumerate()
                .filter(|(_, cp)| Rect::from_center_size(cp.pos, cp_size).overlaps(&player))
                .map(|(i, _)| Contact::PlayerCheckpoint(i)),
        );
    }

    contacts.extend(
        world
            .enemies
            .iter()
            .filter(|e| e.body.enabled && geometry.hazard_overlaps(&e.body.bounds()))
            .map(|e| Contact::EnemyHazard(e.id)),
    );

    contacts
}
