use crate::client::{ClientError, RestClient};
use crate::error::RunError;
use krun_gen::{Codec, GeneratedResource};
use tracing::{debug, info};

/// Annotation holding the configuration submitted with `--save-config`.
pub const LAST_APPLIED_CONFIG_ANNOTATION: &str =
    "kubectl.kubernetes.io/last-applied-configuration";

/// Create endpoint of a namespaced collection.
pub fn collection_path(namespace: &str, collection: &str) -> String {
    format!("/namespaces/{}/{}", namespace, collection)
}

/// Submit `resource` with a single create request and return the object the
/// server answered with.
///
/// The returned object is the authoritative state: the server may have added
/// fields (annotations in particular) that the submitted object lacks. A
/// transport error does not tell whether the server applied the create.
pub async fn dispatch(
    client: &dyn RestClient,
    codec: &dyn Codec,
    namespace: &str,
    resource: &GeneratedResource,
) -> Result<GeneratedResource, RunError> {
    let path = collection_path(namespace, resource.collection());
    let body = codec.encode(resource).map_err(|source| RunError::Encode {
        kind: resource.kind(),
        source,
    })?;

    info!("creating {} in namespace {}", resource.short_name(), namespace);
    let response = client.post(&path, body).await?;
    debug!("POST {} -> {}", path, response.status);

    if !response.is_success() {
        let message = String::from_utf8_lossy(&response.body).into_owned();
        return Err(ClientError::api_error(response.status, message).into());
    }
    codec.decode(&response.body).map_err(RunError::Decode)
}

/// Record the serialized resource in the last-applied annotation.
pub fn update_apply_annotation(
    resource: &mut GeneratedResource,
    codec: &dyn Codec,
) -> Result<(), RunError> {
    if let Some(annotations) = resource.metadata_mut().annotations.as_mut() {
        annotations.remove(LAST_APPLIED_CONFIG_ANNOTATION);
    }
    let encoded = codec.encode(resource).map_err(|source| RunError::Encode {
        kind: resource.kind(),
        source,
    })?;
    resource
        .metadata_mut()
        .annotations
        .get_or_insert_with(Default::default)
        .insert(
            LAST_APPLIED_CONFIG_ANNOTATION.to_string(),
            String::from_utf8_lossy(&encoded).into_owned(),
        );
    Ok(())
}
