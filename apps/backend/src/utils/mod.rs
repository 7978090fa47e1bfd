pub mod clock;
pub mod tokens;
