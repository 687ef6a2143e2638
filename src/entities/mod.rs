//! Player and monster state

pub mod monster;
pub mod player;

pub use monster::MonsterInstance;
pub use player::PlayerData;
