pub mod deck;
pub mod model;
pub mod preset;
