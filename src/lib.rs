pub mod output;
pub mod verify;
