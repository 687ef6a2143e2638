//! Damage calculation
//!
//! One round is an opposed d20 roll. The higher roll hits; the damage
//! grows with the margin and shrinks as the attacker gets hurt:
//!
//! ```text
//! damage = ceil((margin + 1) / 20 * attack * health / max_health)
//! ```
//!
//! A natural 20 doubles `attack` before scaling. Equal rolls do nothing.

use serde::{Deserialize, Serialize};

use super::dice::{RollPair, D20};
use crate::data::Item;
use crate::entities::{MonsterInstance, PlayerData};
use crate::world::Room;

/// Which side won the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Same roll on both dice, replay the round
    Tie,
    PlayerHit,
    MonsterHit,
}

/// Result of one combat round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub outcome: RoundOutcome,
    pub damage_dealt: u32,
    /// The hit came from a natural 20
    pub critical: bool,
    /// The side that was hit has no health left
    pub defeated: bool,
    pub log_text: String,
}

/// Damage for a winning roll, rounded up.
///
/// Integer arithmetic keeps the rounding exact. The product is taken in
/// `u128`, wide enough for any `u32` stats; the result saturates at `u32::MAX`.
pub fn round_damage(winner: D20, loser: D20, attack: u32, health: u32, max_health: u32) -> u32 {
    let margin = u128::from(winner.value().saturating_sub(loser.value())) + 1;
    let attack = if winner.is_critical() {
        u128::from(attack) * 2
    } else {
        u128::from(attack)
    };
    let numerator = margin * attack * u128::from(health);
    let denominator = 20 * u128::from(max_health.max(1));
    u32::try_from(numerator.div_ceil(denominator)).unwrap_or(u32::MAX)
}

/// Work out one round without touching any state
pub fn resolve_round(
    player_roll: D20,
    monster_roll: D20,
    player: &PlayerData,
    monster: &MonsterInstance,
) -> RoundResult {
    if player_roll == monster_roll {
        return RoundResult {
            outcome: RoundOutcome::Tie,
            damage_dealt: 0,
            critical: false,
            defeated: false,
            log_text: format!("Both rolled {}. Roll again!", player_roll.value()),
        };
    }

    if player_roll > monster_roll {
        let damage = round_damage(
            player_roll,
            monster_roll,
            player.attack,
            player.health,
            player.max_health,
        );
        let critical = player_roll.is_critical();
        let defeated = damage >= monster.health;

        let mut log_text = format!("You hit the {} for {} damage.", monster.label, damage);
        if critical {
            log_text = format!("CRITICAL! {}", log_text);
        }
        if defeated {
            log_text.push_str(&format!(" The {} is defeated!", monster.label));
        }

        RoundResult {
            outcome: RoundOutcome::PlayerHit,
            damage_dealt: damage,
            critical,
            defeated,
            log_text,
        }
    } else {
        let damage = round_damage(
            monster_roll,
            player_roll,
            monster.attack,
            monster.health,
            monster.max_health,
        );
        let critical = monster_roll.is_critical();
        let defeated = damage >= player.health;

        let mut log_text = format!("The {} hits you for {} damage.", monster.label, damage);
        if critical {
            log_text = format!("CRITICAL! {}", log_text);
        }
        if defeated {
            log_text.push_str(" You have fallen.");
        }

        RoundResult {
            outcome: RoundOutcome::MonsterHit,
            damage_dealt: damage,
            critical,
            defeated,
            log_text,
        }
    }
}

/// Convenience over [`resolve_round`] for a buffered pair
pub fn resolve_pair(rolls: RollPair, player: &PlayerData, monster: &MonsterInstance) -> RoundResult {
    resolve_round(rolls.player, rolls.monster, player, monster)
}

/// What applying a round changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundEffects {
    /// The room's monster died this round
    pub monster_defeated: bool,
    /// It was the floor boss
    pub boss_defeated: bool,
    /// Item the player picked up from the cleared room
    pub loot: Option<Item>,
    pub player_defeated: bool,
}

/// Apply a resolved round to the player and the room the fight is in
pub fn apply_round(result: &RoundResult, player: &mut PlayerData, room: &mut Room) -> RoundEffects {
    let mut effects = RoundEffects::default();

    match result.outcome {
        RoundOutcome::Tie => {}
        RoundOutcome::PlayerHit => {
            let Some(monster) = room.monster.as_mut() else {
                return effects;
            };
            monster.take_damage(result.damage_dealt);

            if monster.is_defeated() {
                effects.monster_defeated = true;
                effects.boss_defeated = monster.boss;
                player.kill_count += 1;

                if let Some(item) = room.item.take() {
                    player.collect(&item);
                    effects.loot = Some(item);
                }
                room.monster = None;
            }
        }
        RoundOutcome::MonsterHit => {
            player.take_damage(result.damage_dealt);
            effects.player_defeated = player.is_dead();
        }
    }

    effects
}
