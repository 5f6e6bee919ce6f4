use k8s_openapi::api::core::v1::{Pod, ReplicationController, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::{Metadata, Resource};
use serde::Serialize;

/// A resource produced by a generator, or returned by the API server after a
/// create request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeneratedResource {
    Service(Service),
    Pod(Pod),
    ReplicationController(ReplicationController),
}

impl GeneratedResource {
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratedResource::Service(_) => Service::KIND,
            GeneratedResource::Pod(_) => Pod::KIND,
            GeneratedResource::ReplicationController(_) => {
                ReplicationController::KIND
            }
        }
    }

    /// Plural collection name used in the create URL.
    pub fn collection(&self) -> &'static str {
        match self {
            GeneratedResource::Service(_) => Service::URL_PATH_SEGMENT,
            GeneratedResource::Pod(_) => Pod::URL_PATH_SEGMENT,
            GeneratedResource::ReplicationController(_) => {
                ReplicationController::URL_PATH_SEGMENT
            }
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            GeneratedResource::Service(r) => r.metadata(),
            GeneratedResource::Pod(r) => r.metadata(),
            GeneratedResource::ReplicationController(r) => r.metadata(),
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            GeneratedResource::Service(r) => r.metadata_mut(),
            GeneratedResource::Pod(r) => r.metadata_mut(),
            GeneratedResource::ReplicationController(r) => r.metadata_mut(),
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    /// `<kind>/<name>` in lower case, e.g. `service/foo`.
    pub fn short_name(&self) -> String {
        format!("{}/{}", self.kind().to_lowercase(), self.name())
    }

    pub fn as_service(&self) -> Option<&Service> {
        match self {
            GeneratedResource::Service(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pod(&self) -> Option<&Pod> {
        match self {
            GeneratedResource::Pod(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_replication_controller(&self) -> Option<&ReplicationController> {
        match self {
            GeneratedResource::ReplicationController(rc) => Some(rc),
            _ => None,
        }
    }
}

impl From<Service> for GeneratedResource {
    fn from(value: Service) -> Self {
        GeneratedResource::Service(value)
    }
}

impl From<Pod> for GeneratedResource {
    fn from(value: Pod) -> Self {
        GeneratedResource::Pod(value)
    }
}

impl From<ReplicationController> for GeneratedResource {
    fn from(value: ReplicationController) -> Self {
        GeneratedResource::ReplicationController(value)
    }
}
