pub mod args;
pub mod game_loop;
pub mod input;
pub mod render;
