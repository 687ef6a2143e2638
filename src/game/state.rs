//! Game state machine
//!
//! One run through the dungeon: the current floor, the player, the combat
//! roll buffer and the message log. Movement, potions and dice all go
//! through [`Game`] so the phase rules are enforced in one place.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::combat::{
    apply_round, resolve_pair, CombatError, DiceOwner, RollBuffer, RollPair, RoundEffects,
    RoundOutcome, RoundResult, D20,
};
use crate::data::{DataManager, ItemKind, MAX_FLOOR};
use crate::entities::PlayerData;
use crate::save::{SaveData, SaveError};
use crate::world::{grid, Direction, ExitDoor, LevelGenerator, LevelResult};

/// Messages kept in the log
const MESSAGE_LIMIT: usize = 100;

/// Where the run is at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but no floor generated yet
    Start,
    /// Free to move or drink a potion
    Standby,
    /// Fighting the monster in the current room
    Combat,
    GameOver,
    Victory,
}

impl GamePhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Result of a movement command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Movement is not allowed in the current phase
    Ignored,
    /// No door that way, or nothing behind it
    Blocked,
    /// The end room is locked and the player has no key
    Locked,
    Entered { room: usize, combat: bool },
    Descended { floor: u32 },
}

/// Result of drinking a potion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotionOutcome {
    /// The run is over
    Unavailable,
    NoPotions,
    AlreadyFull,
    Healed(u32),
}

/// A resolved combat round and what it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub rolls: RollPair,
    pub result: RoundResult,
    pub effects: RoundEffects,
    /// Phase after the round was applied
    pub phase: GamePhase,
}

impl RoundReport {
    /// Equal rolls; both dice must be thrown again
    pub fn needs_replay(&self) -> bool {
        self.result.outcome == RoundOutcome::Tie
    }
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
}

/// Categories for message filtering/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Combat,
    Item,
    System,
    Warning,
}

/// The main game struct that holds all game data
pub struct Game {
    phase: GamePhase,
    /// Current floor, `None` until the run starts
    level: Option<LevelResult>,
    player: PlayerData,
    rolls: RollBuffer,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    seed: u64,
    messages: Vec<GameMessage>,
    /// Floor tables and tuning
    data: DataManager,
}

impl Game {
    pub fn new(data: DataManager, seed: u64) -> Self {
        let player = PlayerData::new(&data.config.player);
        Self {
            phase: GamePhase::Start,
            level: None,
            player,
            rolls: RollBuffer::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
            messages: Vec::new(),
            data,
        }
    }

    /// Rebuild a run from a save. The RNG is reseeded, so later floors differ
    /// from the run that was saved.
    pub fn from_save(data: DataManager, save: SaveData, seed: u64) -> Result<Self, SaveError> {
        if save.level.rooms.len() != grid::BLOCK_COUNT {
            return Err(SaveError::InvalidData(format!(
                "expected {} rooms, found {}",
                grid::BLOCK_COUNT,
                save.level.rooms.len()
            )));
        }
        if save.level.room(save.player.room_index).map_or(true, |r| !r.is_room) {
            return Err(SaveError::InvalidData(format!(
                "player stands in block {} which is not a room",
                save.player.room_index
            )));
        }

        let mut game = Self::new(data, seed);
        game.phase = save.phase;
        game.player = save.player;
        game.level = Some(save.level);
        game.add_message(
            format!("Resumed on floor {}.", save.floor),
            MessageCategory::System,
        );
        log::info!("Restored game on floor {} ({:?})", save.floor, game.phase);
        Ok(game)
    }

    /// Generate floor 1 and put the player in its start room
    pub fn start(&mut self) {
        self.player = PlayerData::new(&self.data.config.player);
        self.rolls.clear();
        self.messages.clear();

        let level = self.generate_floor(1, None);
        self.enter_floor(level);
        self.phase = GamePhase::Standby;

        self.add_message("You enter the dungeon.", MessageCategory::System);
        log::info!("New run started with seed {}", self.seed);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerData {
        &self.player
    }

    pub fn level(&self) -> Option<&LevelResult> {
        self.level.as_ref()
    }

    pub fn floor(&self) -> u32 {
        self.player.floor_index
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn data(&self) -> &DataManager {
        &self.data
    }

    /// True while one die of the current round is still missing
    pub fn awaiting_roll(&self) -> bool {
        self.rolls.is_waiting()
    }

    /// Get all messages
    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    /// Add a message to the log
    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            category,
        });

        // Keep only the most recent messages
        if self.messages.len() > MESSAGE_LIMIT {
            self.messages.remove(0);
        }
    }

    /// Walk through a door of the current room
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase != GamePhase::Standby {
            return MoveOutcome::Ignored;
        }
        let Some(level) = self.level.as_ref() else {
            return MoveOutcome::Ignored;
        };
        let Some(current) = level.room(self.player.room_index) else {
            return MoveOutcome::Ignored;
        };

        // The way in from the floor above is one-way
        if !current.doors.is_open(direction) || current.entry_door == Some(direction) {
            return MoveOutcome::Blocked;
        }

        if current.end_room && current.exit_door == Some(direction) {
            if current.has_monster() {
                return MoveOutcome::Blocked;
            }
            if let Some(exit) = ExitDoor::new(current.index, direction) {
                return self.descend(exit);
            }
            return MoveOutcome::Blocked;
        }

        let Some(next) = level.room_through(current.index, direction) else {
            return MoveOutcome::Blocked;
        };

        if level.rooms[next].locked {
            if !self.player.key {
                self.add_message(
                    "The door is locked. Find the key first.",
                    MessageCategory::Warning,
                );
                return MoveOutcome::Locked;
            }
            self.player.key = false;
            self.add_message("You unlock the door with the key.", MessageCategory::Item);
        }

        self.enter_room(next)
    }

    /// Drink a potion, if it would do anything
    pub fn drink_potion(&mut self) -> PotionOutcome {
        if self.phase.is_finished() || self.phase == GamePhase::Start {
            return PotionOutcome::Unavailable;
        }
        if self.player.potions == 0 {
            self.add_message("You have no potions.", MessageCategory::Warning);
            return PotionOutcome::NoPotions;
        }
        if self.player.health >= self.player.max_health {
            self.add_message("You are already at full health.", MessageCategory::System);
            return PotionOutcome::AlreadyFull;
        }

        self.player.potions -= 1;
        let healed = self.player.heal(self.data.config.player.potion_heal);
        self.add_message(
            format!("You drink a potion and recover {} health.", healed),
            MessageCategory::Item,
        );
        PotionOutcome::Healed(healed)
    }

    /// Feed one die into the current round.
    ///
    /// Returns the resolved round once both dice are in; the order they
    /// arrive in does not matter.
    pub fn submit_roll(
        &mut self,
        owner: DiceOwner,
        roll: D20,
    ) -> Result<Option<RoundReport>, CombatError> {
        if self.phase != GamePhase::Combat {
            return Err(CombatError::NotInCombat);
        }
        let Some(rolls) = self.rolls.submit(owner, roll)? else {
            return Ok(None);
        };

        let room_index = self.player.room_index;
        let level = self.level.as_mut().ok_or(CombatError::NotInCombat)?;
        let floor_number = level.floor_number;
        let room = level
            .room_mut(room_index)
            .ok_or(CombatError::NotInCombat)?;
        let monster = room.monster.as_ref().ok_or(CombatError::NotInCombat)?;

        let result = resolve_pair(rolls, &self.player, monster);
        let effects = apply_round(&result, &mut self.player, room);

        self.add_message(result.log_text.clone(), MessageCategory::Combat);
        if let Some(item) = &effects.loot {
            let text = match item.kind {
                ItemKind::HealthPotion => "It dropped a health potion.".to_string(),
                ItemKind::TreasureChest => format!("It guarded a chest with {} gold.", item.value),
                ItemKind::Key => "It dropped a key!".to_string(),
            };
            self.add_message(text, MessageCategory::Item);
        }

        if effects.player_defeated {
            self.phase = GamePhase::GameOver;
            self.add_message(
                format!("You died on floor {}.", floor_number),
                MessageCategory::System,
            );
            log::info!("Player died on floor {}", floor_number);
        } else if effects.boss_defeated && floor_number >= MAX_FLOOR {
            self.phase = GamePhase::Victory;
            self.add_message("The dungeon is conquered!", MessageCategory::System);
            log::info!("Run won with {} kills", self.player.kill_count);
        } else if effects.monster_defeated {
            self.phase = GamePhase::Standby;
            if effects.boss_defeated {
                self.add_message("The way down is open.", MessageCategory::System);
            }
        }

        Ok(Some(RoundReport {
            rolls,
            result,
            effects,
            phase: self.phase,
        }))
    }

    /// Throw both dice from the game's own RNG
    pub fn roll_dice(&mut self) -> Result<Option<RoundReport>, CombatError> {
        let player = D20::roll(&mut self.rng);
        let monster = D20::roll(&mut self.rng);
        if let Some(report) = self.submit_roll(DiceOwner::Player, player)? {
            return Ok(Some(report));
        }
        self.submit_roll(DiceOwner::Enemy, monster)
    }

    /// Snapshot for the save system
    pub fn to_save(&self) -> Option<SaveData> {
        let level = self.level.clone()?;
        Some(SaveData::new(self.player.clone(), level, self.phase))
    }

    fn generate_floor(&mut self, floor_number: u32, prior_exit: Option<ExitDoor>) -> LevelResult {
        LevelGenerator::new(&self.data.floors, self.data.config.generation).generate(
            floor_number,
            prior_exit,
            &mut self.rng,
        )
    }

    fn enter_floor(&mut self, mut level: LevelResult) {
        let start = level.room_start.index;
        if let Some(room) = level.room_mut(start) {
            room.visited = true;
        }
        for warning in &level.warnings {
            self.add_message(
                format!("Floor {}: {}", level.floor_number, warning),
                MessageCategory::Warning,
            );
        }

        self.player.floor_index = level.floor_number;
        self.player.room_index = start;
        self.level = Some(level);
    }

    fn enter_room(&mut self, index: usize) -> MoveOutcome {
        let Some(room) = self.level.as_mut().and_then(|l| l.room_mut(index)) else {
            return MoveOutcome::Blocked;
        };
        room.visited = true;
        room.locked = false;
        self.player.room_index = index;

        if let Some(monster) = &room.monster {
            let text = if monster.boss {
                format!("The {} blocks the way down!", monster.label)
            } else {
                format!("A {} attacks!", monster.label)
            };
            self.phase = GamePhase::Combat;
            self.rolls.clear();
            self.add_message(text, MessageCategory::Combat);
            return MoveOutcome::Entered { room: index, combat: true };
        }

        // Only reachable when the floor had items but no monsters to guard them
        if let Some(item) = room.item.take() {
            self.player.collect(&item);
            self.add_message(format!("You found a {}.", item.name), MessageCategory::Item);
        }

        MoveOutcome::Entered { room: index, combat: false }
    }

    fn descend(&mut self, exit: ExitDoor) -> MoveOutcome {
        let next_floor = (self.player.floor_index + 1).min(MAX_FLOOR);
        let level = self.generate_floor(next_floor, Some(exit));

        self.player.key = false;
        self.enter_floor(level);
        self.add_message(
            format!("You descend to floor {}.", next_floor),
            MessageCategory::System,
        );
        log::info!("Descended to floor {}", next_floor);

        MoveOutcome::Descended { floor: next_floor }
    }
}
