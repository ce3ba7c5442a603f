pub mod bootstrap;
pub mod session;
