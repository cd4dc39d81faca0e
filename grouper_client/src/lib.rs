//! A blocking client for the Grouper Web Services REST API.
//!
//! ```no_run
//! use grouper_client::GrouperClientBuilder;
//!
//! let client = GrouperClientBuilder::new()
//!     .address("https://grouper.example.com/grouper-ws/servicesRest/v2_6_000".to_string())
//!     .username("grouper-api".to_string())
//!     .password("secret".to_string())
//!     .build()
//!     .expect("Failed to build client");
//!
//! let group = client.get_group("app:admins", None).expect("Failed to get group");
//! println!("{}", group.display_name);
//! ```

#![deny(warnings)]
#![warn(unused_extern_crates)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unreachable)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::trivially_copy_pass_by_ref)]

#[macro_use]
extern crate tracing;

use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display, Formatter};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

mod attribute;
mod envelope;
mod group;
mod membership;
mod privilege;
mod stem;
mod subject;
pub mod transport;

pub use crate::attribute::AssignAttribute;
pub use crate::envelope::ActAs;
pub use crate::membership::{GroupMembers, GroupMemberships};
pub use crate::privilege::{PrivilegeQuery, Target};
pub use crate::transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
pub use grouper_proto::model;
pub use grouper_proto::v1::{
    AttributeAssignOperation, AttributeAssignType, AttributeValueOperation, MemberFilter,
    PrivilegeType, StemScope, SubjectLookup,
};
pub use reqwest::{Method, StatusCode};

pub const DEFAULT_TIMEOUT: u64 = 30;
pub const DEFAULT_UNIVERSAL_IDENTIFIER_ATTR: &str = "description";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Group,
    Stem,
    Subject,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Group => write!(f, "group"),
            EntityKind::Stem => write!(f, "stem"),
            EntityKind::Subject => write!(f, "subject"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Grouper rejected the credentials: {0}")]
    Unauthorized(String),
    #[error("Permission denied")]
    PermissionDenied(Box<Value>),
    #[error("{kind} not found: {identifier}")]
    EntityNotFound {
        kind: EntityKind,
        identifier: String,
        raw: Box<Value>,
    },
    #[error("Unexpected result from Grouper: {reason}")]
    UnexpectedResult { reason: String, raw: Box<Value> },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),
    #[error("Unable to encode request: {0}")]
    JsonEncode(serde_json::Error),
    #[error("Unable to decode reply: {0}")]
    JsonDecode(serde_json::Error, String),
    #[error("Configuration issue: {0}")]
    ConfigParseIssue(String),
    #[error("Certificate issue: {0}")]
    CertParseIssue(String),
}

impl ClientError {
    /// The full server reply, for the errors raised after Grouper answered.
    pub fn raw(&self) -> Option<&Value> {
        match self {
            ClientError::PermissionDenied(raw)
            | ClientError::EntityNotFound { raw, .. }
            | ClientError::UnexpectedResult { raw, .. } => Some(raw.as_ref()),
            _ => None,
        }
    }

    pub fn is_not_found(&self, expected: EntityKind) -> bool {
        matches!(self, ClientError::EntityNotFound { kind, .. } if *kind == expected)
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GrouperClientConfig {
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Seconds.
    pub timeout: Option<u64>,
    pub universal_identifier_attr: Option<String>,
    pub verify_ca: Option<bool>,
    pub ca_path: Option<String>,
}

#[derive(Clone)]
pub struct GrouperClientBuilder {
    address: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: u64,
    universal_identifier_attr: String,
    verify_ca: bool,
    ca: Option<reqwest::Certificate>,
    use_system_proxies: bool,
}

impl Default for GrouperClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for GrouperClientBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrouperClientBuilder")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("universal_identifier_attr", &self.universal_identifier_attr)
            .field("verify_ca", &self.verify_ca)
            .field("ca", &self.ca.is_some())
            .field("use_system_proxies", &self.use_system_proxies)
            .finish()
    }
}

impl Display for GrouperClientBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(value) => writeln!(f, "address: {}", value)?,
            None => writeln!(f, "address: unset")?,
        }
        match &self.username {
            Some(value) => writeln!(f, "username: {}", value)?,
            None => writeln!(f, "username: unset")?,
        }
        match &self.password {
            Some(_) => writeln!(f, "password: <redacted>")?,
            None => writeln!(f, "password: unset")?,
        }
        writeln!(f, "timeout: {}", self.timeout)?;
        writeln!(
            f,
            "universal_identifier_attr: {}",
            self.universal_identifier_attr
        )?;
        writeln!(f, "verify_ca: {}", self.verify_ca)?;
        match &self.ca {
            Some(_) => writeln!(f, "ca: set")?,
            None => writeln!(f, "ca: unset")?,
        }
        writeln!(f, "use_system_proxies: {}", self.use_system_proxies)
    }
}

impl GrouperClientBuilder {
    pub fn new() -> Self {
        GrouperClientBuilder {
            address: None,
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
            universal_identifier_attr: DEFAULT_UNIVERSAL_IDENTIFIER_ATTR.to_string(),
            verify_ca: true,
            ca: None,
            use_system_proxies: true,
        }
    }

    fn parse_certificate(ca_path: &str) -> Result<reqwest::Certificate, ClientError> {
        let mut buf = Vec::new();
        let mut f = File::open(ca_path).map_err(|e| {
            error!("{:?}", e);
            ClientError::ConfigParseIssue(format!("{:?}", e))
        })?;
        f.read_to_end(&mut buf).map_err(|e| {
            error!("{:?}", e);
            ClientError::ConfigParseIssue(format!("{:?}", e))
        })?;
        reqwest::Certificate::from_pem(&buf).map_err(|e| {
            error!("{:?}", e);
            ClientError::CertParseIssue(format!("{:?}", e))
        })
    }

    fn apply_config_options(self, gcc: GrouperClientConfig) -> Result<Self, ClientError> {
        let address = match gcc.uri {
            Some(uri) => Some(uri),
            None => {
                debug!("No URI in config supplied to apply_config_options");
                self.address
            }
        };
        let ca = match gcc.ca_path {
            Some(ca_path) => Some(Self::parse_certificate(ca_path.as_str())?),
            None => self.ca,
        };

        Ok(GrouperClientBuilder {
            address,
            username: gcc.username.or(self.username),
            password: gcc.password.or(self.password),
            timeout: gcc.timeout.unwrap_or(self.timeout),
            universal_identifier_attr: gcc
                .universal_identifier_attr
                .unwrap_or(self.universal_identifier_attr),
            verify_ca: gcc.verify_ca.unwrap_or(self.verify_ca),
            ca,
            use_system_proxies: self.use_system_proxies,
        })
    }

    /// Apply the options in a TOML file, if it exists.
    pub fn read_options_from_optional_config<P: AsRef<Path> + Debug>(
        self,
        config_path: P,
    ) -> Result<Self, ClientError> {
        let contents = match std::fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No Grouper client configuration at {:?}", config_path);
                return Ok(self);
            }
            Err(e) => {
                warn!(?e, "Skipping unreadable Grouper client configuration {:?}", config_path);
                return Ok(self);
            }
        };

        let config: GrouperClientConfig = toml::from_str(&contents).map_err(|e| {
            error!(?e, "Invalid Grouper client configuration {:?}", config_path);
            ClientError::ConfigParseIssue(format!("{:?}: {}", config_path, e))
        })?;
        debug!(
            has_uri = config.uri.is_some(),
            has_credentials = config.username.is_some() && config.password.is_some(),
            "Loaded Grouper client configuration from {:?}",
            config_path
        );

        self.apply_config_options(config)
    }

    /// The `servicesRest/<version>` base of the Grouper web services.
    pub fn address(self, address: String) -> Self {
        GrouperClientBuilder {
            address: Some(address),
            ..self
        }
    }

    pub fn username(self, username: String) -> Self {
        GrouperClientBuilder {
            username: Some(username),
            ..self
        }
    }

    pub fn password(self, password: String) -> Self {
        GrouperClientBuilder {
            password: Some(password),
            ..self
        }
    }

    /// Request timeout in seconds.
    pub fn timeout(self, secs: u64) -> Self {
        GrouperClientBuilder {
            timeout: secs,
            ..self
        }
    }

    /// The subject attribute used as the universal identifier of non-group subjects.
    pub fn universal_identifier_attr(self, attr: String) -> Self {
        GrouperClientBuilder {
            universal_identifier_attr: attr,
            ..self
        }
    }

    pub fn danger_accept_invalid_certs(self, accept_invalid_certs: bool) -> Self {
        GrouperClientBuilder {
            // We have to flip the bool state here due to english language.
            verify_ca: !accept_invalid_certs,
            ..self
        }
    }

    pub fn no_proxy(self) -> Self {
        GrouperClientBuilder {
            use_system_proxies: false,
            ..self
        }
    }

    pub fn add_root_certificate_filepath(self, ca_path: &str) -> Result<Self, ClientError> {
        let ca = Self::parse_certificate(ca_path)?;
        Ok(GrouperClientBuilder {
            ca: Some(ca),
            ..self
        })
    }

    fn display_warnings(&self, address: &str) {
        if !self.verify_ca {
            warn!("verify_ca set to false in client configuration - this may allow network interception of passwords!");
        }

        if !address.starts_with("https://") {
            warn!("Address does not start with 'https://' - this may allow network interception of passwords!");
        }
    }

    /// Generates a useragent header based on the package name and version
    pub fn user_agent() -> &'static str {
        static APP_USER_AGENT: &str =
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
        APP_USER_AGENT
    }

    fn checked_address(&self) -> Result<String, ClientError> {
        let address = self.address.as_deref().ok_or_else(|| {
            error!("Configuration option 'uri' missing from client configuration, cannot continue client startup without specifying a server to connect to.");
            ClientError::ConfigParseIssue("missing uri".to_string())
        })?;
        Url::parse(address).map_err(|e| {
            error!(?e, "Invalid address {}", address);
            ClientError::ConfigParseIssue(format!("invalid uri {}: {:?}", address, e))
        })?;
        Ok(address.trim_end_matches('/').to_string())
    }

    /// Build the client ready for usage.
    pub fn build(self) -> Result<GrouperClient, ClientError> {
        let address = self.checked_address()?;
        let (username, password) = match (&self.username, &self.password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => {
                error!("Configuration options 'username' and 'password' are both required");
                return Err(ClientError::ConfigParseIssue(
                    "missing username or password".to_string(),
                ));
            }
        };

        self.display_warnings(address.as_str());

        let client_builder = reqwest::blocking::Client::builder()
            .user_agent(GrouperClientBuilder::user_agent())
            .danger_accept_invalid_certs(!self.verify_ca)
            .timeout(Duration::from_secs(self.timeout));

        let client_builder = match self.use_system_proxies {
            true => client_builder,
            false => client_builder.no_proxy(),
        };

        let client_builder = match &self.ca {
            Some(cert) => client_builder.add_root_certificate(cert.clone()),
            None => client_builder,
        };

        let client = client_builder.build().map_err(ClientError::Transport)?;
        let transport = HttpTransport::new(client, address.clone(), username, password);

        Ok(GrouperClient {
            transport: Box::new(transport),
            addr: address,
            universal_identifier_attr: self.universal_identifier_attr,
        })
    }

    /// Build a client that sends its requests through `transport`.
    pub fn build_with_transport(
        self,
        transport: Box<dyn Transport>,
    ) -> Result<GrouperClient, ClientError> {
        let addr = match self.address {
            Some(_) => self.checked_address()?,
            None => String::new(),
        };
        Ok(GrouperClient {
            transport,
            addr,
            universal_identifier_attr: self.universal_identifier_attr,
        })
    }
}

pub struct GrouperClient {
    pub(crate) transport: Box<dyn Transport>,
    pub(crate) addr: String,
    pub(crate) universal_identifier_attr: String,
}

impl Debug for GrouperClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrouperClient")
            .field("addr", &self.addr)
            .field("universal_identifier_attr", &self.universal_identifier_attr)
            .finish()
    }
}

impl GrouperClient {
    pub fn get_url(&self) -> &str {
        self.addr.as_str()
    }

    pub fn universal_identifier_attr(&self) -> &str {
        self.universal_identifier_attr.as_str()
    }

    /// Release the underlying connection pool.
    pub fn close(self) {
        debug!("Closing client for {}", self.addr);
    }

    /// The subject attributes to request: `extra`, plus the ones hydration needs.
    pub(crate) fn subject_attribute_names(&self, extra: &[&str]) -> Vec<String> {
        extra
            .iter()
            .copied()
            .chain([self.universal_identifier_attr.as_str(), "name"])
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
