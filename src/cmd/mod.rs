pub mod compare;
pub mod search;
