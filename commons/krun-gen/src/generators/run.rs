use crate::error::GenerateError;
use crate::params::{
    GeneratorParam, ParameterMap, get_bool, get_i32, get_list, get_str,
    parse_labels, validate_params,
};
use crate::policy::RestartPolicy;
use crate::registry::{Generator, RUN_POD_V1, RUN_V1};
use crate::resource::GeneratedResource;
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, Pod, PodSpec, PodTemplateSpec,
    ReplicationController, ReplicationControllerSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

const RUN_V1_PARAMS: &[GeneratorParam] = &[
    GeneratorParam::optional("labels"),
    GeneratorParam::optional("default-name"),
    GeneratorParam::required("name"),
    GeneratorParam::required("replicas"),
    GeneratorParam::required("image"),
    GeneratorParam::optional("port"),
    GeneratorParam::optional("hostport"),
    GeneratorParam::optional("stdin"),
    GeneratorParam::optional("tty"),
    GeneratorParam::optional("command"),
    GeneratorParam::optional("args"),
    GeneratorParam::optional("env"),
];

const RUN_POD_V1_PARAMS: &[GeneratorParam] = &[
    GeneratorParam::optional("labels"),
    GeneratorParam::optional("default-name"),
    GeneratorParam::required("name"),
    GeneratorParam::required("image"),
    GeneratorParam::optional("port"),
    GeneratorParam::optional("hostport"),
    GeneratorParam::optional("stdin"),
    GeneratorParam::optional("tty"),
    GeneratorParam::optional("restart"),
    GeneratorParam::optional("command"),
    GeneratorParam::optional("args"),
    GeneratorParam::optional("env"),
];

/// `run/v1`: a replication controller running a single container.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicReplicationController;

/// `run-pod/v1`: a bare pod with an explicit restart policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicPod;

impl Generator for BasicReplicationController {
    fn name(&self) -> &'static str {
        RUN_V1
    }

    fn param_names(&self) -> &'static [GeneratorParam] {
        RUN_V1_PARAMS
    }

    fn generate(
        &self,
        params: &ParameterMap,
    ) -> Result<GeneratedResource, GenerateError> {
        validate_params(self.param_names(), params)?;
        let name = workload_name(params)?;
        let labels = workload_labels(params, name)?;
        let replicas = get_i32(params, "replicas")?.unwrap_or(1);
        if replicas < 0 {
            return Err(GenerateError::invalid_value(
                "replicas",
                replicas.to_string(),
            ));
        }
        let container = build_container(params, name)?;

        let rc = ReplicationController {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels: Some(labels.clone()),
                ..Default::default()
            },
            spec: Some(ReplicationControllerSpec {
                replicas: Some(replicas),
                selector: Some(labels.clone()),
                template: Some(PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(labels),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![container],
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        Ok(rc.into())
    }
}

impl Generator for BasicPod {
    fn name(&self) -> &'static str {
        RUN_POD_V1
    }

    fn param_names(&self) -> &'static [GeneratorParam] {
        RUN_POD_V1_PARAMS
    }

    fn generate(
        &self,
        params: &ParameterMap,
    ) -> Result<GeneratedResource, GenerateError> {
        validate_params(self.param_names(), params)?;
        let name = workload_name(params)?;
        let labels = workload_labels(params, name)?;
        let restart_policy = match get_str(params, "restart") {
            Some(raw) => raw.parse::<RestartPolicy>()?,
            None => RestartPolicy::Always,
        };
        let container = build_container(params, name)?;

        let pod = Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels: Some(labels),
                ..Default::default()
            },
            spec: Some(PodSpec {
                containers: vec![container],
                restart_policy: Some(restart_policy.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        Ok(pod.into())
    }
}

fn workload_name(params: &ParameterMap) -> Result<&str, GenerateError> {
    get_str(params, "name")
        .or_else(|| get_str(params, "default-name"))
        .ok_or_else(|| GenerateError::MissingParameter("name".to_string()))
}

/// Explicit labels win; otherwise the workload is tagged `run=<name>`.
fn workload_labels(
    params: &ParameterMap,
    name: &str,
) -> Result<BTreeMap<String, String>, GenerateError> {
    match get_str(params, "labels") {
        Some(spec) => parse_labels(spec),
        None => Ok(BTreeMap::from([("run".to_string(), name.to_string())])),
    }
}

fn build_container(
    params: &ParameterMap,
    name: &str,
) -> Result<Container, GenerateError> {
    let image = get_str(params, "image")
        .ok_or_else(|| GenerateError::MissingParameter("image".to_string()))?;

    let port = get_i32(params, "port")?.filter(|p| *p > 0);
    let host_port = get_i32(params, "hostport")?.filter(|p| *p > 0);
    let ports = match (port, host_port) {
        (None, Some(_)) => {
            return Err(GenerateError::Conflict(
                "--hostport requires --port to be specified".to_string(),
            ));
        }
        (Some(container_port), host_port) => Some(vec![ContainerPort {
            container_port,
            host_port,
            ..Default::default()
        }]),
        (None, None) => None,
    };

    let stdin = get_bool(params, "stdin")?;
    let tty = get_bool(params, "tty")?;
    if tty && !stdin {
        return Err(GenerateError::Conflict(
            "-i/--stdin is required for containers with -t/--tty=true"
                .to_string(),
        ));
    }

    let env = parse_env(get_list(params, "env"))?;
    let args = get_list(params, "args");
    let (command, args) = if args.is_empty() {
        (None, None)
    } else if get_bool(params, "command")? {
        (Some(args.to_vec()), None)
    } else {
        (None, Some(args.to_vec()))
    };

    Ok(Container {
        name: name.to_string(),
        image: Some(image.to_string()),
        ports,
        env: (!env.is_empty()).then_some(env),
        command,
        args,
        stdin: stdin.then_some(true),
        tty: tty.then_some(true),
        ..Default::default()
    })
}

/// Parse `KEY=value` assignments, keeping input order.
pub fn parse_env(entries: &[String]) -> Result<Vec<EnvVar>, GenerateError> {
    entries
        .iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(EnvVar {
                name: key.to_string(),
                value: Some(value.to_string()),
                ..Default::default()
            }),
            _ => Err(GenerateError::InvalidEnv(entry.clone())),
        })
        .collect()
}
