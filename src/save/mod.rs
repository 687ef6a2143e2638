//! Save/load system
//!
//! Game snapshots in JSON slot files.

pub mod save_game;

pub use save_game::{
    delete_save, delete_save_in, list_saves, list_saves_in, load_from_path, load_game,
    load_game_in, save_directory, save_exists, save_exists_in, save_game, save_game_in, save_path,
    save_path_in, save_to_path, SaveData, SaveError, SaveSummary, SAVE_SLOTS, SAVE_VERSION,
};
