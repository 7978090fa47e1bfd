//! Domain layer: session model, phase engine and game vocabulary.

pub mod avatar;
pub mod item;
pub mod phase;
pub mod prompt;
pub mod session;
pub mod view;


pub use avatar::Avatar;
pub use item::Item;
pub use phase::{compute_phase, compute_winner, Outcome, Phase, PhaseState};
pub use prompt::{Prompt, PROMPT_PRESETS};
pub use session::{Player, PlayerId, Session, SessionConfig, SessionId, MIN_PLAYERS};
pub use view::{PlayerView, SessionView};
