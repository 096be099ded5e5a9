//! Host facts collector.
//!
//! Gathers mounted disks, network identity, memory, uptime and OS identity
//! from OS utilities and `/proc`, and returns them as one flat, ordered
//! mapping of fact name to value.
//!
//! ```no_run
//! use hostfacts::{Config, Facter, LocalHost};
//!
//! let facter = Facter::new(LocalHost::new(), Config::default());
//! let facts = facter.facter_info();
//! println!("{}", serde_json::to_string_pretty(&facts).unwrap());
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod facter;
pub mod models;
pub mod system;
pub mod util;

pub use config::Config;
pub use facter::Facter;
pub use models::facts::FactSet;
pub use models::mount::MountRecord;
pub use system::LocalHost;
