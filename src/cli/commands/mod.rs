pub mod board;
pub mod card;
pub mod column;
pub mod label;
pub mod list;
pub mod workspace;
