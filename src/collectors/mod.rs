pub mod df;
pub mod meminfo;
pub mod network;
pub mod os;
pub mod overrides;
