pub mod credential;
pub mod portfolio;
