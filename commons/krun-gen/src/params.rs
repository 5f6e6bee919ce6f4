use crate::error::GenerateError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Generator input, keyed by parameter name.
pub type ParameterMap = BTreeMap<String, ParamValue>;

/// A single parameter value. Generators only ever see one of these shapes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    List(Vec<String>),
    Map(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Empty strings, lists and maps count as "not provided".
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Str(s) => s.is_empty(),
            ParamValue::List(items) => items.is_empty(),
            ParamValue::Map(map) => map.is_empty(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

/// A parameter a generator understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorParam {
    pub name: &'static str,
    pub required: bool,
}

impl GeneratorParam {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// Check that every required parameter is present and non-empty.
pub fn validate_params(
    names: &[GeneratorParam],
    params: &ParameterMap,
) -> Result<(), GenerateError> {
    for param in names.iter().filter(|p| p.required) {
        match params.get(param.name) {
            Some(value) if !value.is_empty() => {}
            _ => {
                return Err(GenerateError::MissingParameter(
                    param.name.to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Keep only the scalar string entries of a parameter map.
pub fn string_params(params: &ParameterMap) -> ParameterMap {
    params
        .iter()
        .filter(|(_, v)| matches!(v, ParamValue::Str(_)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Non-empty string value of `key`, if any.
pub fn get_str<'a>(params: &'a ParameterMap, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(ParamValue::as_str)
        .filter(|s| !s.is_empty())
}

pub fn get_list<'a>(params: &'a ParameterMap, key: &str) -> &'a [String] {
    params
        .get(key)
        .and_then(ParamValue::as_list)
        .unwrap_or_default()
}

/// Parse a boolean parameter; absent means `false`.
pub fn get_bool(params: &ParameterMap, key: &str) -> Result<bool, GenerateError> {
    match get_str(params, key) {
        None => Ok(false),
        Some(v) => v
            .parse::<bool>()
            .map_err(|_| GenerateError::invalid_value(key, v)),
    }
}

/// Parse an integer parameter if present.
pub fn get_i32(
    params: &ParameterMap,
    key: &str,
) -> Result<Option<i32>, GenerateError> {
    get_str(params, key)
        .map(|v| {
            v.trim()
                .parse::<i32>()
                .map_err(|_| GenerateError::invalid_value(key, v))
        })
        .transpose()
}

/// Parse a `key=value,key=value` label spec.
pub fn parse_labels(
    spec: &str,
) -> Result<BTreeMap<String, String>, GenerateError> {
    let mut labels = BTreeMap::new();
    for pair in spec.split(',') {
        match pair.split_once('=') {
            Some((k, v)) if !k.is_empty() && !v.contains('=') => {
                labels.insert(k.to_string(), v.to_string());
            }
            _ => return Err(GenerateError::InvalidLabels(spec.to_string())),
        }
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &str)]) -> ParameterMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
            .collect()
    }

    #[test]
    fn validate_reports_first_missing_required_param() {
        let names = [
            GeneratorParam::required("name"),
            GeneratorParam::optional("labels"),
            GeneratorParam::required("port"),
        ];
        let err = validate_params(&names, &params(&[("name", "foo")]))
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingParameter(ref p) if p == "port"));
        assert_eq!(err.to_string(), "Parameter: port is required");
    }

    #[test]
    fn validate_treats_empty_values_as_missing() {
        let names = [GeneratorParam::required("name")];
        assert!(validate_params(&names, &params(&[("name", "")])).is_err());

        let mut list = ParameterMap::new();
        list.insert("name".into(), ParamValue::List(vec![]));
        assert!(validate_params(&names, &list).is_err());

        assert!(validate_params(&names, &params(&[("name", "x")])).is_ok());
    }

    #[test]
    fn string_params_drops_lists_and_maps() {
        let mut map = params(&[("name", "foo"), ("port", "80")]);
        map.insert(
            "env".into(),
            ParamValue::List(vec!["a=b".into(), "c=d".into()]),
        );
        map.insert("nested".into(), ParamValue::Map(params(&[("k", "v")])));

        let filtered = string_params(&map);
        assert_eq!(filtered, params(&[("name", "foo"), ("port", "80")]));
    }

    #[test]
    fn parse_labels_accepts_multiple_pairs() {
        let labels = parse_labels("app=bar,tier=web").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["app"], "bar");
        assert_eq!(labels["tier"], "web");
    }

    #[test]
    fn parse_labels_rejects_malformed_pairs() {
        for spec in ["app", "=bar", "app=bar,", "a=b=c", ""] {
            assert!(parse_labels(spec).is_err(), "{spec} should be rejected");
        }
    }

    #[test]
    fn numeric_and_bool_helpers() {
        let map = params(&[("port", "80"), ("tty", "true"), ("bad", "x")]);
        assert_eq!(get_i32(&map, "port").unwrap(), Some(80));
        assert_eq!(get_i32(&map, "missing").unwrap(), None);
        assert!(get_i32(&map, "bad").is_err());
        assert!(get_bool(&map, "tty").unwrap());
        assert!(!get_bool(&map, "stdin").unwrap());
        assert!(get_bool(&map, "bad").is_err());
    }
}
