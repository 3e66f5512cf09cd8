mod settings;

pub use settings::{Environment, Settings};
