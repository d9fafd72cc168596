pub mod console;
pub mod restaurants;
pub mod search;
