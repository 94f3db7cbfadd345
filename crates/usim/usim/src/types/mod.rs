//! Value types shared by the card drivers and the software card

mod auth;
mod challenge;
mod file;

pub use auth::{AkaKeys, AkaOutcome, Auts, GsmAuthResult};
pub use challenge::Challenge;
pub use file::{Aid, CardMode, FileRef};
