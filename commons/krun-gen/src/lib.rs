pub mod codec;
pub mod error;
pub mod generators;
pub mod params;
pub mod policy;
pub mod registry;
pub mod resource;

pub use codec::*;
pub use error::*;
pub use generators::*;
pub use params::*;
pub use policy::*;
pub use registry::*;
pub use resource::*;
