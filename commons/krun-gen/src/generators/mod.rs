mod run;
mod service;

pub use run::{BasicPod, BasicReplicationController, parse_env};
pub use service::{ServiceGeneratorV1, ServiceGeneratorV2};
