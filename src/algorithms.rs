pub mod blend;
pub mod search;
