pub mod client;
pub mod error;
pub mod params;
pub mod record;
pub mod validation;

pub use client::SimulationClient;
pub use error::{ClientError, RenderError, ValidationError};
pub use params::{ClientVariant, FormValues, SimulationParams};
pub use record::ResultRecord;
pub use validation::validate;
