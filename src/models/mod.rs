pub mod facts;
pub mod mount;
