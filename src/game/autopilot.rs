//! Headless play
//!
//! A simple policy that plays a run without input: heal when low, fight
//! whatever is in the room, clear every room, then take the key to the end
//! room and go down. Used by the binary and the benchmarks.

use std::collections::VecDeque;

use super::state::{Game, GamePhase, MoveOutcome};
use crate::combat::CombatError;
use crate::world::{grid, Direction, LevelResult, Room, BLOCK_COUNT};

/// Health fraction below which a potion gets used
pub const POTION_THRESHOLD: f32 = 0.4;

/// What the autopilot did on one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DrinkPotion,
    Roll,
    Move(Direction),
}

/// Summary of one floor as the player left it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorReport {
    pub floor: u32,
    pub rooms: usize,
    pub rooms_visited: usize,
    pub kills: u32,
    pub gold: u32,
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub steps: usize,
    pub floors: Vec<FloorReport>,
    pub phase: GamePhase,
}

/// Pick the next action, or `None` when there is nothing left to do
pub fn next_action(game: &Game) -> Option<Action> {
    let player = game.player();
    match game.phase() {
        GamePhase::Start | GamePhase::GameOver | GamePhase::Victory => return None,
        _ => {}
    }

    if player.potions > 0
        && player.health < player.max_health
        && player.percentage() < POTION_THRESHOLD
    {
        return Some(Action::DrinkPotion);
    }
    if game.phase() == GamePhase::Combat {
        return Some(Action::Roll);
    }

    let level = game.level()?;
    let here = player.room_index;
    let current = level.room(here)?;

    if current.end_room && !current.has_monster() {
        return current.exit_door.map(Action::Move);
    }

    let can_enter = |room: &Room| !room.locked || player.key;
    let unexplored = |room: &Room| !room.visited && !room.end_room;
    if let Some(direction) = first_step(level, here, unexplored, can_enter) {
        return Some(Action::Move(direction));
    }

    first_step(level, here, |room| room.end_room, can_enter).map(Action::Move)
}

/// Take one action. Returns `None` when no action was possible.
pub fn step(game: &mut Game) -> Result<Option<Action>, CombatError> {
    let Some(action) = next_action(game) else {
        return Ok(None);
    };
    match action {
        Action::DrinkPotion => {
            game.drink_potion();
        }
        Action::Roll => {
            game.roll_dice()?;
        }
        Action::Move(direction) => {
            if game.move_player(direction) == MoveOutcome::Blocked {
                log::warn!("autopilot walked into a wall going {:?}", direction);
                return Ok(None);
            }
        }
    }
    Ok(Some(action))
}

/// Play until the run ends, the policy gets stuck, or `max_steps` runs out
pub fn run(game: &mut Game, max_steps: usize) -> Result<RunReport, CombatError> {
    let mut floors = Vec::new();
    let mut steps = 0;
    let mut floor = game.floor();
    let mut report = floor_report(game);

    while steps < max_steps {
        if step(game)?.is_none() {
            break;
        }
        steps += 1;

        if game.floor() != floor {
            floors.push(report);
            floor = game.floor();
        }
        report = floor_report(game);
    }
    floors.push(report);

    if !game.phase().is_finished() {
        log::warn!("autopilot stopped after {} steps on floor {}", steps, floor);
    }

    Ok(RunReport {
        steps,
        floors,
        phase: game.phase(),
    })
}

fn floor_report(game: &Game) -> FloorReport {
    let player = game.player();
    let (rooms, rooms_visited) = game.level().map_or((0, 0), |level| {
        (
            level.room_count(),
            level.rooms.iter().filter(|r| r.is_room && r.visited).count(),
        )
    });
    FloorReport {
        floor: game.floor(),
        rooms,
        rooms_visited,
        kills: player.kill_count,
        gold: player.gold,
        health: player.health,
    }
}

/// Direction of the first move on a shortest door path to a room matching `goal`
fn first_step(
    level: &LevelResult,
    from: usize,
    goal: impl Fn(&Room) -> bool,
    can_enter: impl Fn(&Room) -> bool,
) -> Option<Direction> {
    let mut first: [Option<Direction>; BLOCK_COUNT] = [None; BLOCK_COUNT];
    let mut seen = [false; BLOCK_COUNT];
    let mut queue = VecDeque::new();

    seen[from] = true;
    queue.push_back(from);

    while let Some(index) = queue.pop_front() {
        for adj in grid::adjacent_blocks(index) {
            let Some(next) = level.room_through(index, adj.direction) else {
                continue;
            };
            if seen[next] {
                continue;
            }
            let room = &level.rooms[next];
            if !can_enter(room) {
                continue;
            }
            seen[next] = true;
            first[next] = if index == from { Some(adj.direction) } else { first[index] };

            if goal(room) {
                return first[next];
            }
            queue.push_back(next);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataManager, GameConfig, PlayerConfig};

    fn started(seed: u64, data: DataManager) -> Game {
        let mut game = Game::new(data, seed);
        game.start();
        game
    }

    #[test]
    fn test_nothing_to_do_before_start() {
        let game = Game::new(DataManager::default(), 1);
        assert_eq!(next_action(&game), None);
    }

    #[test]
    fn test_first_step_is_an_open_door() {
        for seed in 0..50 {
            let game = started(seed, DataManager::default());
            if let Some(Action::Move(direction)) = next_action(&game) {
                let level = game.level().unwrap();
                assert!(level.room_through(game.player().room_index, direction).is_some());
            }
        }
    }

    #[test]
    fn test_drinks_when_low() {
        let data = DataManager::default();
        let mut game = started(3, data);
        let max = game.player().max_health;
        let mut save = game.to_save().unwrap();
        save.player.health = max / 5;
        game = Game::from_save(DataManager::default(), save, 3).unwrap();

        assert_eq!(next_action(&game), Some(Action::DrinkPotion));
        step(&mut game).unwrap();
        assert_eq!(game.player().potions, 0);
    }

    #[test]
    fn test_runs_end_or_stop_within_budget() {
        for seed in 0..10 {
            let mut game = started(seed, DataManager::default());
            let report = run(&mut game, 5_000).unwrap();

            assert!(report.steps <= 5_000);
            assert!(!report.floors.is_empty());
            assert_eq!(report.phase, game.phase());
            let floors: Vec<u32> = report.floors.iter().map(|f| f.floor).collect();
            let mut sorted = floors.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(floors, sorted, "floors are reported once, in order");
        }
    }

    #[test]
    fn test_strong_player_clears_the_first_floor() {
        let config = GameConfig {
            player: PlayerConfig {
                health: 10_000,
                attack: 500,
                ..PlayerConfig::default()
            },
            ..GameConfig::default()
        };
        let data = DataManager {
            config,
            ..DataManager::default()
        };

        let mut descended = 0;
        for seed in 0..20 {
            let mut game = started(seed, data.clone());
            run(&mut game, 2_000).unwrap();
            if game.floor() > 1 {
                descended += 1;
            }
        }
        assert!(descended >= 15, "only {} of 20 runs left floor 1", descended);
    }
}
