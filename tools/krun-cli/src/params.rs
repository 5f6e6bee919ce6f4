use krun_gen::{GeneratorParam, ParamValue, ParameterMap};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagValue {
    Scalar(String),
    List(Vec<String>),
}

/// Parsed command-line flags keyed by their long names. Unset flags are
/// absent; booleans are stored as `"true"`/`"false"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagSet {
    values: BTreeMap<String, FlagValue>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string(mut self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => {
                self.values
                    .insert(name.to_string(), FlagValue::Scalar(v.to_string()));
            }
            None => {
                self.values.remove(name);
            }
        }
        self
    }

    pub fn with_bool(self, name: &str, value: bool) -> Self {
        self.with_string(name, Some(if value { "true" } else { "false" }))
    }

    /// Repeated flag; an empty slice leaves the flag unset.
    pub fn with_list(mut self, name: &str, values: &[String]) -> Self {
        if values.is_empty() {
            self.values.remove(name);
        } else {
            self.values
                .insert(name.to_string(), FlagValue::List(values.to_vec()));
        }
        self
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FlagValue::Scalar(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn get_string_slice(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(FlagValue::List(v)) => v.as_slice(),
            _ => &[],
        }
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.get_string(name) == Some("true")
    }
}

impl From<&FlagValue> for ParamValue {
    fn from(value: &FlagValue) -> Self {
        match value {
            FlagValue::Scalar(v) => ParamValue::Str(v.clone()),
            FlagValue::List(v) => ParamValue::List(v.clone()),
        }
    }
}

/// Every set flag, under its flag name.
pub fn collect(flags: &FlagSet) -> ParameterMap {
    flags
        .values
        .iter()
        .map(|(name, value)| (name.clone(), ParamValue::from(value)))
        .collect()
}

/// Only the flags a generator declares.
pub fn make_params(flags: &FlagSet, names: &[GeneratorParam]) -> ParameterMap {
    names
        .iter()
        .filter_map(|param| {
            flags
                .values
                .get(param.name)
                .map(|value| (param.name.to_string(), ParamValue::from(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_list_keeps_order_and_duplicates() {
        let env = vec!["a=b".to_string(), "c=d".to_string(), "a=b".to_string()];
        let flags = FlagSet::new().with_list("env", &env[..2]);
        assert_eq!(flags.get_string_slice("env"), &["a=b", "c=d"]);

        let params = collect(&flags);
        assert_eq!(
            params.get("env"),
            Some(&ParamValue::List(vec!["a=b".into(), "c=d".into()]))
        );

        let params = collect(&FlagSet::new().with_list("env", &env));
        assert_eq!(params["env"].as_list().unwrap().len(), 3);
    }

    #[test]
    fn scalars_map_one_to_one_and_unset_flags_are_omitted() {
        let flags = FlagSet::new()
            .with_string("port", Some("80"))
            .with_string("labels", None)
            .with_bool("dry-run", true);
        let params = collect(&flags);
        assert_eq!(params.len(), 2);
        assert_eq!(params["port"], ParamValue::from("80"));
        assert_eq!(params["dry-run"], ParamValue::from("true"));
        assert!(!params.contains_key("labels"));
    }

    #[test]
    fn make_params_filters_by_generator_names() {
        let flags = FlagSet::new()
            .with_string("port", Some("80"))
            .with_string("image", Some("nginx"))
            .with_bool("dry-run", false);
        let names = [
            GeneratorParam::required("image"),
            GeneratorParam::optional("port"),
            GeneratorParam::optional("hostport"),
        ];
        let params = make_params(&flags, &names);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["image", "port"]);
    }

    #[test]
    fn bool_lookup_defaults_to_false() {
        let flags = FlagSet::new().with_bool("stdin", false);
        assert!(!flags.get_bool("stdin"));
        assert!(!flags.get_bool("tty"));
        assert!(flags.clone().with_bool("tty", true).get_bool("tty"));
    }
}
