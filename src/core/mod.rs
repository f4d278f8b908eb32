pub mod profile;
pub mod schema;
pub mod session;
pub mod shell;
pub mod validate;
pub mod workflow;
