pub mod account;
pub mod portfolio;
pub mod resume;
