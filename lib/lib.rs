/// Chess domain types and the rules core.
pub mod chess;
/// The interactive match layer.
pub mod game;
