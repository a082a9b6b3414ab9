//! Utility modules for the site compiler.

pub mod date;
pub mod glob;
pub mod html;
pub mod mime;
pub mod path;
pub mod plural;
pub mod slug;
