pub mod session;
pub mod workbench;
