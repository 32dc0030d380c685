//! Encounters and respawn
//!
//! Contact outcomes (stomp, death, hazard kills, checkpoint activation) and
//! the respawn sequence. A respawn disables the player at once and brings it
//! back after a settle delay counted in ticks, so the physics system never
//! sees a body teleported into stale contacts.

use glam::Vec2;

use super::actor::{Enemy, EnemyId};
use super::contact::Contact;
use super::state::{DeathCause, GameEvent, KillCause, PendingRespawn, World};
use crate::consts::CHECKPOINT_MATCH_TOLERANCE;
use crate::persistence::CheckpointRecord;

impl World {
    /// Apply a step's contacts in order.
    ///
    /// Contacts involving a body that an earlier contact in the same list
    /// disabled are skipped.
    pub fn resolve_contacts(&mut self, contacts: &[Contact], stomp_held: bool) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for &contact in contacts {
            self.resolve_contact(contact, stomp_held, &mut events);
        }
        events
    }

    fn resolve_contact(&mut self, contact: Contact, stomp_held: bool, events: &mut Vec<GameEvent>) {
        let player_active = self.player.body.enabled;
        match contact {
            Contact::EnemyHazard(id) => {
                if self.kill_enemy(id) {
                    events.push(GameEvent::EnemyKilled {
                        enemy: id,
                        cause: KillCause::Hazard,
                    });
                }
            }
            Contact::PlayerHazard if player_active => {
                self.kill_player(DeathCause::Hazard, events);
            }
            Contact::PlayerEnemy(id) if player_active => {
                let Some(enemy) = self.enemy(id).filter(|e| e.body.enabled) else {
                    return;
                };
                if self.is_stomp(enemy, stomp_held) {
                    self.kill_enemy(id);
                    events.push(GameEvent::EnemyKilled {
                        enemy: id,
                        cause: KillCause::Stomp,
                    });
                } else {
                    self.kill_player(DeathCause::Enemy(id), events);
                }
            }
            Contact::PlayerCheckpoint(index) if player_active => {
                if self.activate_checkpoint(index) {
                    events.push(GameEvent::CheckpointActivated(index));
                }
            }
            _ => {}
        }
    }

    /// Player well above the enemy, stomp held, moving down
    pub fn is_stomp(&self, enemy: &Enemy, stomp_held: bool) -> bool {
        let gap = enemy.body.pos.y - self.player.body.pos.y;
        gap > self.tuning.stomp_min_gap && stomp_held && self.player.body.vel.y > 0.0
    }

    /// Disable an enemy until the next respawn. False if it was not active.
    pub fn kill_enemy(&mut self, id: EnemyId) -> bool {
        match self.enemy_mut(id) {
            Some(enemy) if enemy.body.enabled => {
                enemy.body.disable();
                log::debug!("Enemy {} killed at {:?}", id.0, enemy.body.pos);
                true
            }
            _ => false,
        }
    }

    fn kill_player(&mut self, cause: DeathCause, events: &mut Vec<GameEvent>) {
        log::info!("Player died ({cause:?}) at {:?}", self.player.body.pos);
        events.push(GameEvent::PlayerDied(cause));
        self.respawn_player();
    }

    /// Where the player reappears: above the active checkpoint, else the start
    pub fn respawn_target(&self) -> Vec2 {
        match self.active_checkpoint() {
            Some(cp) => {
                let lift = self.tuning.checkpoint_size / 2.0 + self.tuning.actor_size / 2.0 + 2.0;
                Vec2::new(cp.pos.x, cp.pos.y - lift)
            }
            None => self.start,
        }
    }

    /// Disable the player and schedule its return after the settle delay.
    ///
    /// Requests made while a respawn is pending merge into it. Returns false
    /// for a merged request.
    pub fn respawn_player(&mut self) -> bool {
        let ticks = self.tuning.respawn_settle_ticks();
        self.schedule_respawn(ticks)
    }

    pub(crate) fn schedule_respawn(&mut self, ticks: u32) -> bool {
        if self.pending_respawn.is_some() {
            log::debug!("Respawn already pending, request merged");
            return false;
        }
        self.player.body.disable();
        self.pending_respawn = Some(PendingRespawn {
            ticks_left: ticks.max(1),
        });
        log::debug!("Respawn scheduled in {} ticks", ticks.max(1));
        true
    }

    /// Count down a pending respawn; returns the player position when it completes.
    ///
    /// The target is resolved at completion, so a checkpoint reset during the
    /// delay is honored.
    pub fn advance_respawn(&mut self) -> Option<Vec2> {
        let pending = self.pending_respawn.as_mut()?;
        pending.ticks_left = pending.ticks_left.saturating_sub(1);
        if pending.ticks_left > 0 {
            return None;
        }
        self.pending_respawn = None;

        let target = self.respawn_target();
        self.player.body.enable_at(target);
        self.player.fast_falling = false;
        self.player.on_ground = false;
        self.respawn_enemies();

        log::info!("Player respawned at {target:?}");
        Some(target)
    }

    /// Every enemy, alive or not, back to its spawn and patrolling
    pub fn respawn_enemies(&mut self) {
        let speed = self.tuning.patrol_speed;
        for enemy in &mut self.enemies {
            enemy.reset(speed);
        }
    }

    /// Make `index` the only active checkpoint and persist it.
    ///
    /// False if it was already active or does not exist.
    pub fn activate_checkpoint(&mut self, index: usize) -> bool {
        match self.checkpoints.get(index) {
            Some(cp) if !cp.active => {}
            _ => return false,
        }
        for (i, cp) in self.checkpoints.iter_mut().enumerate() {
            cp.active = i == index;
        }

        let pos = self.checkpoints[index].pos;
        let record = CheckpointRecord { x: pos.x, y: pos.y };
        if let Err(e) = self.store_mut().save(&record) {
            log::warn!("Failed to persist checkpoint {index}: {e}");
        }
        log::info!("Checkpoint {index} activated at {pos:?}");
        true
    }

    /// Deactivate every checkpoint, forget the saved one, and respawn at the start
    pub fn reset_checkpoints(&mut self) {
        for cp in &mut self.checkpoints {
            cp.active = false;
        }
        if let Err(e) = self.store_mut().remove() {
            log::warn!("Failed to clear saved checkpoint: {e}");
        }
        log::info!("Checkpoints reset");
        self.queued_events.push(GameEvent::CheckpointsReset);
        if self.respawn_player() {
            self.queued_events.push(GameEvent::PlayerDied(DeathCause::Reset));
        }
    }

    /// Reactivate the checkpoint matching the stored record, if any.
    ///
    /// Missing or malformed records mean no checkpoint.
    pub fn restore_checkpoint(&mut self) -> Option<usize> {
        let record = match self.store().load() {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Ignoring saved checkpoint: {e}");
                return None;
            }
        };

        let index = self.checkpoints.iter().position(|cp| {
            (cp.pos.x - record.x).abs() < CHECKPOINT_MATCH_TOLERANCE
                && (cp.pos.y - record.y).abs() < CHECKPOINT_MATCH_TOLERANCE
        });
        match index {
            Some(index) => {
                for (i, cp) in self.checkpoints.iter_mut().enumerate() {
                    cp.active = i == index;
                }
                log::info!("Restored checkpoint {index}");
            }
            None => log::warn!("Saved checkpoint {record:?} matches no placed checkpoint"),
        }
        index
    }
}
