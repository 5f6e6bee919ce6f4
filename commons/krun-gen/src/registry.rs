use crate::error::GenerateError;
use crate::generators::{
    BasicPod, BasicReplicationController, ServiceGeneratorV1,
    ServiceGeneratorV2,
};
use crate::params::{GeneratorParam, ParameterMap};
use crate::resource::GeneratedResource;
use tracing::debug;

pub const RUN_V1: &str = "run/v1";
pub const RUN_POD_V1: &str = "run-pod/v1";
pub const SERVICE_V1: &str = "service/v1";
pub const SERVICE_V2: &str = "service/v2";

/// Turns a parameter map into a resource, filling in defaults.
pub trait Generator: std::fmt::Debug {
    fn name(&self) -> &'static str;
    fn param_names(&self) -> &'static [GeneratorParam];
    fn generate(
        &self,
        params: &ParameterMap,
    ) -> Result<GeneratedResource, GenerateError>;
}

/// Generators available to one command, looked up by name.
#[derive(Debug, Default)]
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn Generator + Send + Sync>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in generators for `cmd` (`run` or `expose`). Unknown commands get
    /// an empty registry.
    pub fn for_command(cmd: &str) -> Self {
        let mut registry = Self::new();
        match cmd {
            "run" => {
                registry
                    .register(BasicReplicationController)
                    .register(BasicPod);
            }
            "expose" => {
                registry
                    .register(ServiceGeneratorV1)
                    .register(ServiceGeneratorV2);
            }
            _ => {}
        }
        registry
    }

    /// Add a generator; a later registration replaces one with the same name.
    pub fn register<G>(&mut self, generator: G) -> &mut Self
    where
        G: Generator + Send + Sync + 'static,
    {
        self.generators.retain(|g| g.name() != generator.name());
        self.generators.push(Box::new(generator));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&(dyn Generator + Send + Sync)> {
        self.generators
            .iter()
            .find(|g| g.name() == name)
            .map(|g| g.as_ref())
    }

    /// Like [`lookup`](Self::lookup) but reports an unknown name as an error.
    pub fn get(
        &self,
        name: &str,
    ) -> Result<&(dyn Generator + Send + Sync), GenerateError> {
        let generator = self
            .lookup(name)
            .ok_or_else(|| GenerateError::UnknownGenerator(name.to_string()))?;
        debug!("use generator {}", generator.name());
        Ok(generator)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }
}
