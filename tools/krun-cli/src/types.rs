use crate::config::{ContextConfig, ContextManager};
use crate::params::FlagSet;
use http::Uri;
use std::time::Duration;

/// Main CLI structure
#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct KrunCli {
    #[command(subcommand)]
    pub command: KrunCommands,
}

/// Available CLI commands
#[derive(clap::Subcommand, Clone, Debug)]
pub enum KrunCommands {
    /// Run an image as a replication controller or a pod
    #[clap(aliases = &["r"])]
    Run {
        #[clap(flatten)]
        opt: RunOperation,
        #[clap(flatten)]
        conn: ConnectionArgs,
    },
    /// Create a service selecting an existing workload
    #[clap(aliases = &["svc", "expose"])]
    Service {
        #[clap(flatten)]
        opt: ServiceOperation,
        #[clap(flatten)]
        conn: ConnectionArgs,
    },
    /// Context management operations
    #[clap(aliases = &["ctx"])]
    Context {
        #[command(subcommand)]
        opt: ContextOperation,
    },
}

/// Flags shared by every generating command
#[derive(clap::Args, Clone, Debug, Default)]
pub struct GenerateArgs {
    /// Only print the object that would be sent, without sending it
    #[arg(long)]
    pub dry_run: bool,
    /// Store the submitted configuration in the last-applied annotation
    #[arg(long)]
    pub save_config: bool,
    /// Output format for the generated or created object
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputFormat>,
}

/// `run` parameters
#[derive(clap::Args, Clone, Debug, Default)]
pub struct RunOperation {
    /// Workload name
    pub name: String,
    /// Container arguments. Example: `krun run box --image busybox -- sh -c date`
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
    /// Container image
    #[arg(long)]
    pub image: Option<String>,
    /// Number of replicas (run/v1 only)
    #[arg(short, long, default_value = "1")]
    pub replicas: String,
    /// Port the container exposes
    #[arg(long)]
    pub port: Option<String>,
    /// Host port mapped to `--port`
    #[arg(long)]
    pub hostport: Option<String>,
    /// Labels as `key=value,key=value`
    #[arg(short, long)]
    pub labels: Option<String>,
    /// Environment variable `KEY=value`, repeatable. Example: `--env A=1 --env B=2`
    #[arg(short, long)]
    pub env: Vec<String>,
    /// Restart policy: Always, OnFailure or Never. Defaults to OnFailure with `-i`, Always otherwise
    #[arg(long, default_value = "")]
    pub restart: String,
    /// Keep stdin open on the container
    #[arg(short = 'i', long)]
    pub stdin: bool,
    /// Allocate a TTY (requires `-i`)
    #[arg(short = 't', long)]
    pub tty: bool,
    /// Use the trailing arguments as the container command instead of its args
    #[arg(long)]
    pub command: bool,
    /// Generator name (run/v1 or run-pod/v1). Picked from the restart policy when unset
    #[arg(long)]
    pub generator: Option<String>,
    /// Also create a service for the workload (requires `--port`)
    #[arg(long)]
    pub expose: bool,
    /// Generator used with `--expose`
    #[arg(long, default_value = krun_gen::SERVICE_V2)]
    pub service_generator: String,
    #[clap(flatten)]
    pub gen_args: GenerateArgs,
}

/// `service` parameters
#[derive(clap::Args, Clone, Debug, Default)]
pub struct ServiceOperation {
    /// Service name, also used for the default `run=<name>` selector
    pub name: String,
    /// Service port
    #[arg(long)]
    pub port: Option<String>,
    /// Labels as `key=value,key=value`; also used as the selector
    #[arg(short, long)]
    pub labels: Option<String>,
    /// Port on the selected pods; defaults to `--port`
    #[arg(long)]
    pub target_port: Option<String>,
    /// Network protocol (TCP, UDP, SCTP)
    #[arg(long)]
    pub protocol: Option<String>,
    /// Service type: ClusterIP, NodePort or LoadBalancer
    #[arg(long = "type")]
    pub service_type: Option<String>,
    /// Session affinity: None or ClientIP
    #[arg(long)]
    pub session_affinity: Option<String>,
    /// External IP routed to the service
    #[arg(long)]
    pub external_ip: Option<String>,
    /// Load balancer IP (LoadBalancer type only)
    #[arg(long)]
    pub load_balancer_ip: Option<String>,
    /// Name of the service port
    #[arg(long)]
    pub port_name: Option<String>,
    /// Generator name (service/v1 or service/v2)
    #[arg(long, default_value = krun_gen::SERVICE_V2)]
    pub generator: String,
    #[clap(flatten)]
    pub gen_args: GenerateArgs,
}

impl GenerateArgs {
    fn apply(&self, flags: FlagSet) -> FlagSet {
        flags
            .with_bool(crate::generate::DRY_RUN_FLAG, self.dry_run)
            .with_bool(crate::generate::SAVE_CONFIG_FLAG, self.save_config)
            .with_string(
                crate::generate::OUTPUT_FLAG,
                self.output.as_ref().map(OutputFormat::as_str),
            )
    }
}

impl RunOperation {
    /// Flag values keyed by their long names
    pub fn flags(&self) -> FlagSet {
        let flags = FlagSet::new()
            .with_string("image", self.image.as_deref())
            .with_string("replicas", Some(&self.replicas))
            .with_string("port", self.port.as_deref())
            .with_string("hostport", self.hostport.as_deref())
            .with_string("labels", self.labels.as_deref())
            .with_list("env", &self.env)
            .with_string("restart", Some(&self.restart))
            .with_bool("stdin", self.stdin)
            .with_bool("tty", self.tty)
            .with_bool("command", self.command);
        self.gen_args.apply(flags)
    }
}

impl ServiceOperation {
    /// Flag values keyed by the service generator parameter names
    pub fn flags(&self) -> FlagSet {
        let flags = FlagSet::new()
            .with_string("port", self.port.as_deref())
            .with_string("labels", self.labels.as_deref())
            .with_string("target-port", self.target_port.as_deref())
            .with_string("protocol", self.protocol.as_deref())
            .with_string("type", self.service_type.as_deref())
            .with_string("session-affinity", self.session_affinity.as_deref())
            .with_string("external-ip", self.external_ip.as_deref())
            .with_string("load-balancer-ip", self.load_balancer_ip.as_deref())
            .with_string("port-name", self.port_name.as_deref());
        self.gen_args.apply(flags)
    }
}

/// Connection configuration
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// API server URL including the version prefix (overrides the context)
    #[arg(short, long, global = true)]
    pub server: Option<Uri>,
    /// Target namespace (overrides the context)
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub request_timeout: Option<u64>,
}

/// Connection settings after merging flags with the selected context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConnection {
    pub server: String,
    pub namespace: String,
    pub timeout: Option<Duration>,
}

impl ConnectionArgs {
    /// Fill unset values from the current context. The context file is only
    /// read when a flag is missing.
    pub async fn with_context(&self) -> anyhow::Result<ResolvedConnection> {
        if self.server.is_some() && self.namespace.is_some() {
            return self.resolve(&ContextConfig::default());
        }
        let manager = ContextManager::new().await?;
        let context = manager
            .get_current_context()
            .cloned()
            .unwrap_or_default();
        self.resolve(&context)
    }

    /// Merge the flags over `context`.
    pub fn resolve(
        &self,
        context: &ContextConfig,
    ) -> anyhow::Result<ResolvedConnection> {
        let server = match &self.server {
            Some(uri) => uri.to_string(),
            None => context
                .server
                .clone()
                .ok_or_else(|| anyhow::anyhow!("No API server configured"))?,
        };
        let namespace = self
            .namespace
            .clone()
            .unwrap_or_else(|| context.namespace_or_default().to_string());

        tracing::debug!("using server {server} namespace {namespace}");
        Ok(ResolvedConnection {
            server,
            namespace,
            timeout: self.request_timeout.map(Duration::from_secs),
        })
    }
}

/// Context operation commands
#[derive(clap::Subcommand, Clone, Debug)]
pub enum ContextOperation {
    /// Configure connection settings
    #[clap(aliases = &["s", "update"])]
    Set {
        /// Context name (defaults to current)
        name: Option<String>,
        /// API server URL including the version prefix
        #[arg(long)]
        server: Option<String>,
        /// Default namespace
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Display current configuration
    #[clap(aliases = &["g"])]
    Get,
    /// Switch between contexts
    Select {
        /// Context name to switch to
        name: String,
    },
}

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Name,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Name => "name",
        }
    }
}
