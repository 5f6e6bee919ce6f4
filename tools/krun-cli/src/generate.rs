use crate::client::RestClient;
use crate::dispatch::{dispatch, update_apply_annotation};
use crate::error::RunError;
use crate::output::{OutputFormat, write_resource};
use crate::params::{FlagSet, collect, make_params};
use crate::types::{RunOperation, ServiceOperation};
use krun_gen::{
    Codec, GenerateError, GeneratedResource, Generator, GeneratorRegistry,
    JsonCodec, ParamValue, ParameterMap, RUN_POD_V1, RUN_V1, RestartPolicy,
    get_str, resolve_restart_policy, string_params, validate_params,
};
use std::io::Write;
use tracing::debug;

pub const DRY_RUN_FLAG: &str = "dry-run";
pub const SAVE_CONFIG_FLAG: &str = "save-config";
pub const OUTPUT_FLAG: &str = "output";
pub const PORT_FLAG: &str = "port";

/// Collaborators of one invocation: the transport and the wire codec.
pub struct Factory {
    client: Box<dyn RestClient>,
    codec: Box<dyn Codec>,
}

impl Factory {
    pub fn new<C>(client: C) -> Self
    where
        C: RestClient + 'static,
    {
        Self {
            client: Box::new(client),
            codec: Box::new(JsonCodec),
        }
    }

    /// Generators available to `cmd`.
    pub fn generators(&self, cmd: &str) -> GeneratorRegistry {
        GeneratorRegistry::for_command(cmd)
    }

    pub fn client(&self) -> &dyn RestClient {
        self.client.as_ref()
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }
}

/// What happened to a generated resource.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchOutcome {
    /// Dry run: the locally generated object, never sent.
    Printed(GeneratedResource),
    /// The object the server returned from the create request.
    Submitted(GeneratedResource),
}

impl DispatchOutcome {
    pub fn resource(&self) -> &GeneratedResource {
        match self {
            DispatchOutcome::Printed(r) | DispatchOutcome::Submitted(r) => r,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, DispatchOutcome::Printed(_))
    }
}

/// The `--port` value needed to expose a service.
pub fn required_port(flags: &FlagSet) -> Result<i32, RunError> {
    let raw = flags
        .get_string(PORT_FLAG)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| GenerateError::MissingParameter(PORT_FLAG.to_string()))?;
    match raw.trim().parse::<i32>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(RunError::validation(format!(
            "--port must be a positive integer to expose a service, got {:?}",
            raw
        ))),
    }
}

/// Generate a service selecting the workload named by `params` (or the
/// first positional argument), then print or submit it.
pub async fn generate_service(
    factory: &Factory,
    flags: &FlagSet,
    args: &[String],
    generator_name: &str,
    params_in: &ParameterMap,
    namespace: &str,
    out: &mut dyn Write,
) -> Result<DispatchOutcome, RunError> {
    let port = required_port(flags)?;
    let registry = factory.generators("expose");
    let generator = registry.get(generator_name)?;

    let mut params = string_params(params_in);
    let name = get_str(&params, "name")
        .map(str::to_string)
        .or_else(|| args.first().filter(|a| !a.is_empty()).cloned())
        .ok_or_else(|| GenerateError::MissingParameter("name".to_string()))?;

    // Explicit labels win over the run=<name> fallback.
    let selector = get_str(&params, "labels")
        .map(str::to_string)
        .unwrap_or_else(|| format!("run={}", name));
    params.insert("selector".to_string(), ParamValue::Str(selector));
    if get_str(&params, "default-name").is_none() {
        params.insert("default-name".to_string(), ParamValue::Str(name));
    }
    params.insert(PORT_FLAG.to_string(), ParamValue::Str(port.to_string()));

    let outcome =
        create_generated_object(factory, flags, generator, &params, namespace)
            .await?;
    print_outcome(flags, &outcome, out)?;
    Ok(outcome)
}

/// Validate, generate, then either stop at a dry run or dispatch.
pub async fn create_generated_object(
    factory: &Factory,
    flags: &FlagSet,
    generator: &(dyn Generator + Send + Sync),
    params: &ParameterMap,
    namespace: &str,
) -> Result<DispatchOutcome, RunError> {
    validate_params(generator.param_names(), params)?;
    let mut resource = generator.generate(params)?;
    debug!("{} generated {}", generator.name(), resource.short_name());

    if flags.get_bool(DRY_RUN_FLAG) {
        return Ok(DispatchOutcome::Printed(resource));
    }
    if flags.get_bool(SAVE_CONFIG_FLAG) {
        update_apply_annotation(&mut resource, factory.codec())?;
    }
    let created =
        dispatch(factory.client(), factory.codec(), namespace, &resource).await?;
    Ok(DispatchOutcome::Submitted(created))
}

/// Write the outcome in the `--output` format, or as a summary line.
pub fn print_outcome(
    flags: &FlagSet,
    outcome: &DispatchOutcome,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let format = flags
        .get_string(OUTPUT_FLAG)
        .map(|v| {
            <OutputFormat as clap::ValueEnum>::from_str(v, true).map_err(|_| {
                RunError::validation(format!("unknown output format: {}", v))
            })
        })
        .transpose()?;
    write_resource(out, outcome.resource(), format.as_ref(), outcome.is_dry_run())
}

/// `krun run`: a workload, and with `--expose` a service in front of it.
pub async fn run_command(
    factory: &Factory,
    opt: &RunOperation,
    namespace: &str,
    out: &mut dyn Write,
) -> Result<Vec<DispatchOutcome>, RunError> {
    if opt.name.is_empty() {
        return Err(RunError::validation("NAME is required for run"));
    }
    let policy = resolve_restart_policy(&opt.restart, opt.stdin)?;
    let flags = opt.flags().with_string("restart", Some(policy.as_str()));
    if opt.expose {
        required_port(&flags)?;
    }

    let generator_name = match opt.generator.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ if policy == RestartPolicy::Always => RUN_V1,
        _ => RUN_POD_V1,
    };
    if generator_name == RUN_V1 && policy != RestartPolicy::Always {
        return Err(RunError::validation(format!(
            "{} requires restart policy Always, got {}",
            RUN_V1, policy
        )));
    }

    let registry = factory.generators("run");
    let generator = registry.get(generator_name)?;
    let mut params = make_params(&flags, generator.param_names());
    params.insert("name".to_string(), ParamValue::Str(opt.name.clone()));
    if !opt.args.is_empty() {
        params.insert("args".to_string(), ParamValue::List(opt.args.clone()));
    }
    debug!("run params: {:?}", params);

    let workload =
        create_generated_object(factory, &flags, generator, &params, namespace)
            .await?;
    print_outcome(&flags, &workload, out)?;
    let mut outcomes = vec![workload];

    if opt.expose {
        let service = generate_service(
            factory,
            &flags,
            std::slice::from_ref(&opt.name),
            &opt.service_generator,
            &params,
            namespace,
            out,
        )
        .await?;
        outcomes.push(service);
    }
    Ok(outcomes)
}

/// `krun service`: a service selecting an existing workload.
pub async fn service_command(
    factory: &Factory,
    opt: &ServiceOperation,
    namespace: &str,
    out: &mut dyn Write,
) -> Result<DispatchOutcome, RunError> {
    let flags = opt.flags();
    let mut params = collect(&flags);
    params.insert("name".to_string(), ParamValue::Str(opt.name.clone()));
    generate_service(
        factory,
        &flags,
        std::slice::from_ref(&opt.name),
        &opt.generator,
        &params,
        namespace,
        out,
    )
    .await
}
