//! Rendering of viewmodel rows into page markup.
//!
//! # Module Structure
//!
//! - `table`: declarative column mappings from typed rows to cells
//! - `renderer`: minijinja templates turning rows into escaped markup

mod renderer;
mod table;

pub use renderer::{ListItem, NavLink, NoteItem, RenderError, Renderer, SelectOption, Tone};
pub use table::{Cell, Column, RowAction, TableLayout};
