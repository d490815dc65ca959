pub mod canvas;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod font;
pub mod game_loop;
pub mod input;
pub mod render;
pub mod sprites;
