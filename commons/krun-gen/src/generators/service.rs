use crate::error::GenerateError;
use crate::params::{
    GeneratorParam, ParameterMap, get_bool, get_i32, get_str, parse_labels,
    validate_params,
};
use crate::registry::{Generator, SERVICE_V1, SERVICE_V2};
use crate::resource::GeneratedResource;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

const SERVICE_V1_PARAMS: &[GeneratorParam] = &[
    GeneratorParam::required("default-name"),
    GeneratorParam::optional("name"),
    GeneratorParam::required("selector"),
    GeneratorParam::required("port"),
    GeneratorParam::optional("labels"),
    GeneratorParam::optional("external-ip"),
    GeneratorParam::optional("create-external-load-balancer"),
    GeneratorParam::optional("protocol"),
    GeneratorParam::optional("container-port"),
    GeneratorParam::optional("port-name"),
];

const SERVICE_V2_PARAMS: &[GeneratorParam] = &[
    GeneratorParam::required("default-name"),
    GeneratorParam::optional("name"),
    GeneratorParam::required("selector"),
    GeneratorParam::required("port"),
    GeneratorParam::optional("labels"),
    GeneratorParam::optional("external-ip"),
    GeneratorParam::optional("create-external-load-balancer"),
    GeneratorParam::optional("load-balancer-ip"),
    GeneratorParam::optional("type"),
    GeneratorParam::optional("protocol"),
    GeneratorParam::optional("container-port"),
    GeneratorParam::optional("target-port"),
    GeneratorParam::optional("port-name"),
    GeneratorParam::optional("session-affinity"),
];

const SERVICE_TYPES: &[&str] = &["ClusterIP", "NodePort", "LoadBalancer"];
const SESSION_AFFINITIES: &[&str] = &["None", "ClientIP"];

/// Legacy service generator: single port, no type or affinity control.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceGeneratorV1;

/// Service generator with type, session affinity and target port support.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceGeneratorV2;

impl Generator for ServiceGeneratorV1 {
    fn name(&self) -> &'static str {
        SERVICE_V1
    }

    fn param_names(&self) -> &'static [GeneratorParam] {
        SERVICE_V1_PARAMS
    }

    fn generate(
        &self,
        params: &ParameterMap,
    ) -> Result<GeneratedResource, GenerateError> {
        validate_params(self.param_names(), params)?;
        let mut service = base_service(params)?;
        let spec = service.spec.get_or_insert_with(Default::default);
        let port = first_port_mut(spec);
        port.target_port = Some(match get_str(params, "container-port") {
            Some(v) => parse_target_port(v),
            None => IntOrString::Int(port.port),
        });
        spec.type_ = Some(if get_bool(params, "create-external-load-balancer")? {
            "LoadBalancer".to_string()
        } else {
            "ClusterIP".to_string()
        });
        Ok(service.into())
    }
}

impl Generator for ServiceGeneratorV2 {
    fn name(&self) -> &'static str {
        SERVICE_V2
    }

    fn param_names(&self) -> &'static [GeneratorParam] {
        SERVICE_V2_PARAMS
    }

    fn generate(
        &self,
        params: &ParameterMap,
    ) -> Result<GeneratedResource, GenerateError> {
        validate_params(self.param_names(), params)?;
        let mut service = base_service(params)?;
        let spec = service.spec.get_or_insert_with(Default::default);

        let target = match (
            get_str(params, "target-port"),
            get_str(params, "container-port"),
        ) {
            (Some(_), Some(_)) => {
                return Err(GenerateError::Conflict(
                    "only one of 'target-port' and 'container-port' may be set"
                        .to_string(),
                ));
            }
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        };
        let port = first_port_mut(spec);
        port.target_port = Some(match target {
            Some(v) => parse_target_port(v),
            None => IntOrString::Int(port.port),
        });

        let mut service_type =
            one_of(params, "type", SERVICE_TYPES)?.unwrap_or("ClusterIP");
        if get_bool(params, "create-external-load-balancer")? {
            service_type = "LoadBalancer";
        }
        spec.type_ = Some(service_type.to_string());
        spec.session_affinity = Some(
            one_of(params, "session-affinity", SESSION_AFFINITIES)?
                .unwrap_or("None")
                .to_string(),
        );
        if let Some(ip) = get_str(params, "load-balancer-ip") {
            spec.load_balancer_ip = Some(ip.to_string());
        }
        Ok(service.into())
    }
}

/// Metadata, selector and the single port shared by every version.
fn base_service(params: &ParameterMap) -> Result<Service, GenerateError> {
    let name = get_str(params, "name")
        .or_else(|| get_str(params, "default-name"))
        .ok_or_else(|| GenerateError::MissingParameter("name".to_string()))?;
    let selector = get_str(params, "selector")
        .map(parse_labels)
        .transpose()?
        .ok_or_else(|| GenerateError::MissingParameter("selector".to_string()))?;
    let labels = get_str(params, "labels").map(parse_labels).transpose()?;

    let port = get_i32(params, "port")?
        .ok_or_else(|| GenerateError::MissingParameter("port".to_string()))?;
    let protocol = get_str(params, "protocol").unwrap_or("TCP");

    let external_ips =
        get_str(params, "external-ip").map(|ip| vec![ip.to_string()]);

    Ok(Service {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels,
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(selector),
            ports: Some(vec![ServicePort {
                name: get_str(params, "port-name").map(str::to_string),
                port,
                protocol: Some(protocol.to_string()),
                ..Default::default()
            }]),
            external_ips,
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn first_port_mut(spec: &mut ServiceSpec) -> &mut ServicePort {
    let ports = spec.ports.get_or_insert_with(Vec::new);
    if ports.is_empty() {
        ports.push(ServicePort::default());
    }
    &mut ports[0]
}

/// Numeric target ports become ints, anything else a named port.
fn parse_target_port(value: &str) -> IntOrString {
    match value.parse::<i32>() {
        Ok(n) => IntOrString::Int(n),
        Err(_) => IntOrString::String(value.to_string()),
    }
}

fn one_of<'a>(
    params: &'a ParameterMap,
    key: &str,
    allowed: &[&str],
) -> Result<Option<&'a str>, GenerateError> {
    match get_str(params, key) {
        Some(v) if !allowed.contains(&v) => {
            Err(GenerateError::invalid_value(key, v))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use std::collections::BTreeMap;

    fn params(entries: &[(&str, &str)]) -> ParameterMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
            .collect()
    }

    fn labels(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn generate_v2(entries: &[(&str, &str)]) -> Result<Service, GenerateError> {
        ServiceGeneratorV2
            .generate(&params(entries))
            .map(|r| r.as_service().cloned().unwrap())
    }

    #[test]
    fn v2_fills_defaults() {
        let svc = generate_v2(&[
            ("default-name", "foo"),
            ("name", "foo"),
            ("selector", "run=foo"),
            ("port", "80"),
        ])
        .unwrap();

        let expected = Service {
            metadata: ObjectMeta {
                name: Some("foo".into()),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                ports: Some(vec![ServicePort {
                    port: 80,
                    protocol: Some("TCP".into()),
                    target_port: Some(IntOrString::Int(80)),
                    ..Default::default()
                }]),
                selector: Some(labels(&[("run", "foo")])),
                type_: Some("ClusterIP".into()),
                session_affinity: Some("None".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(svc, expected);
    }

    #[test]
    fn v2_labels_are_applied_to_metadata() {
        let svc = generate_v2(&[
            ("default-name", "foo"),
            ("selector", "app=bar"),
            ("labels", "app=bar"),
            ("port", "80"),
        ])
        .unwrap();
        assert_eq!(svc.metadata.labels, Some(labels(&[("app", "bar")])));
        assert_eq!(
            svc.spec.unwrap().selector,
            Some(labels(&[("app", "bar")]))
        );
    }

    #[test]
    fn v2_target_port_and_alias() {
        let svc = generate_v2(&[
            ("default-name", "foo"),
            ("selector", "run=foo"),
            ("port", "80"),
            ("target-port", "http"),
            ("protocol", "UDP"),
        ])
        .unwrap();
        let port = &svc.spec.unwrap().ports.unwrap()[0];
        assert_eq!(port.target_port, Some(IntOrString::String("http".into())));
        assert_eq!(port.protocol.as_deref(), Some("UDP"));

        let svc = generate_v2(&[
            ("default-name", "foo"),
            ("selector", "run=foo"),
            ("port", "80"),
            ("container-port", "8080"),
        ])
        .unwrap();
        assert_eq!(
            svc.spec.unwrap().ports.unwrap()[0].target_port,
            Some(IntOrString::Int(8080))
        );

        let err = generate_v2(&[
            ("default-name", "foo"),
            ("selector", "run=foo"),
            ("port", "80"),
            ("container-port", "8080"),
            ("target-port", "8080"),
        ])
        .unwrap_err();
        assert!(matches!(err, GenerateError::Conflict(_)));
    }

    #[test]
    fn v2_type_and_affinity() {
        let svc = generate_v2(&[
            ("default-name", "foo"),
            ("selector", "run=foo"),
            ("port", "80"),
            ("type", "NodePort"),
            ("session-affinity", "ClientIP"),
            ("external-ip", "10.0.0.1"),
        ])
        .unwrap();
        let spec = svc.spec.unwrap();
        assert_eq!(spec.type_.as_deref(), Some("NodePort"));
        assert_eq!(spec.session_affinity.as_deref(), Some("ClientIP"));
        assert_eq!(spec.external_ips, Some(vec!["10.0.0.1".to_string()]));

        let svc = generate_v2(&[
            ("default-name", "foo"),
            ("selector", "run=foo"),
            ("port", "80"),
            ("create-external-load-balancer", "true"),
        ])
        .unwrap();
        assert_eq!(svc.spec.unwrap().type_.as_deref(), Some("LoadBalancer"));

        assert!(
            generate_v2(&[
                ("default-name", "foo"),
                ("selector", "run=foo"),
                ("port", "80"),
                ("type", "External"),
            ])
            .is_err()
        );
    }

    #[test]
    fn v2_rejects_bad_port_and_missing_selector() {
        let err = generate_v2(&[
            ("default-name", "foo"),
            ("selector", "run=foo"),
            ("port", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidValue { .. }));

        let err =
            generate_v2(&[("default-name", "foo"), ("port", "80")]).unwrap_err();
        assert!(matches!(err, GenerateError::MissingParameter(ref p) if p == "selector"));
    }

    #[test]
    fn v1_has_no_session_affinity() {
        let resource = ServiceGeneratorV1
            .generate(&params(&[
                ("default-name", "foo"),
                ("selector", "run=foo"),
                ("port", "80"),
                ("container-port", "8080"),
                ("session-affinity", "ClientIP"),
            ]))
            .unwrap();
        let spec = resource.as_service().unwrap().spec.clone().unwrap();
        assert_eq!(spec.session_affinity, None);
        assert_eq!(spec.type_.as_deref(), Some("ClusterIP"));
        assert_eq!(
            spec.ports.unwrap()[0].target_port,
            Some(IntOrString::Int(8080))
        );
    }
}
