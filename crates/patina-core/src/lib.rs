pub mod arbiter;
pub mod config;
pub mod consts;
pub mod controller;
pub mod disclosure;
pub mod error;
pub mod frame;
pub mod input;
pub mod layers;
pub mod scheduler;
pub mod script;
pub mod sequencer;
pub mod transform;

pub use controller::Controller;
pub use error::{PatinaError, Result};
