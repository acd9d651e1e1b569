//! Input handling module
//!
//! Maps display events to semantic actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction, QUIT_KEY};
