pub mod permission;
pub mod pipeline;
pub mod token;
pub mod user;
