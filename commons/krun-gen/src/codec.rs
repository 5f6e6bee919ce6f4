use crate::resource::GeneratedResource;
use k8s_openapi::Resource;
use k8s_openapi::api::core::v1::{Pod, ReplicationController, Service};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("object has no 'kind' field")]
    MissingKind,

    #[error("unsupported kind: {0}")]
    UnsupportedKind(String),
}

/// Wire encoding of resource objects.
pub trait Codec: Send + Sync {
    fn encode(&self, resource: &GeneratedResource) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, data: &[u8]) -> Result<GeneratedResource, CodecError>;
}

/// JSON codec. Encoded objects carry `apiVersion` and `kind`, and decoding
/// dispatches on `kind`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, resource: &GeneratedResource) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(resource)?)
    }

    fn decode(&self, data: &[u8]) -> Result<GeneratedResource, CodecError> {
        let value: Value = serde_json::from_slice(data)?;
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(CodecError::MissingKind)?
            .to_string();
        if kind == Service::KIND {
            Ok(GeneratedResource::Service(serde_json::from_value(value)?))
        } else if kind == Pod::KIND {
            Ok(GeneratedResource::Pod(serde_json::from_value(value)?))
        } else if kind == ReplicationController::KIND {
            Ok(GeneratedResource::ReplicationController(
                serde_json::from_value(value)?,
            ))
        } else {
            Err(CodecError::UnsupportedKind(kind))
        }
    }
}
