//! The configuration tree for the MMseqs2 web service.
//!
//! Each record derives `Serialize`/`Deserialize` (field keys below are the
//! serialization keys used in documents and override paths) and implements
//! [`Record`] so overrides can address its fields by key.
//!
//! All records use `#[serde(default)]`: a document may omit anything, and
//! required-field checks happen afterwards in [`validate`](crate::validate).

use serde::{Deserialize, Serialize};

use crate::schema::{
    FieldMeta, LeafKind, LeafMut, LeafValue, NodeMut, NodeRef, OptionalRecord, Record,
};

/// The built-in configuration document. Path values starting with `~` are
/// resolved against the directory of the running executable.
pub const DEFAULT_DOCUMENT: &str = r#"{
    "verbose": true,
    "server": {
        "address": "127.0.0.1:8081",
        "pathprefix": "/api/",
        "dbmanagment": false,
        "cors": true
    },
    "paths": {
        "databases": "~databases",
        "results": "~jobs",
        "mmseqs": "~mmseqs"
    },
    "redis": {
        "network": "tcp",
        "address": "localhost:6379",
        "password": "",
        "index": 0
    },
    "mail": {
        "type": "null",
        "sender": "mail@example.org",
        "templates": {
            "success": {
                "subject": "Done -- %s",
                "body": "%s"
            },
            "timeout": {
                "subject": "Timeout -- %s",
                "body": "%s"
            },
            "error": {
                "subject": "Error -- %s",
                "body": "%s"
            }
        }
    }
}
"#;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigRoot {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub redis: RedisConfig,
    pub mail: MailConfig,
    pub verbose: bool,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    #[serde(rename = "pathprefix")]
    pub path_prefix: String,
    #[serde(rename = "dbmanagment")]
    pub db_management: bool,
    pub cors: bool,
    pub auth: Option<AuthConfig>,
}

/// HTTP basic-auth credentials. Both fields are required once the record exists.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub databases: String,
    pub results: String,
    pub temporary: String,
    pub mmseqs: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct RedisConfig {
    pub network: String,
    pub address: String,
    pub password: String,
    pub index: i64,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct MailConfig {
    #[serde(rename = "type")]
    pub transport: String,
    pub sender: String,
    pub templates: MailTemplates,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct MailTemplates {
    pub success: MailTemplate,
    pub timeout: MailTemplate,
    pub error: MailTemplate,
}

/// Subject and body format strings; `%s` is replaced by the job id.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct MailTemplate {
    pub subject: String,
    pub body: String,
}

impl ConfigRoot {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::record("server", ServerConfig::FIELDS)
            .required()
            .doc("HTTP server settings."),
        FieldMeta::record("paths", PathsConfig::FIELDS)
            .required()
            .doc("Filesystem locations. Values starting with '~' are relative to the anchor directory."),
        FieldMeta::record("redis", RedisConfig::FIELDS).doc("Job queue broker connection."),
        FieldMeta::record("mail", MailConfig::FIELDS).doc("Job notification mails."),
        FieldMeta::leaf("verbose", LeafKind::Bool).doc("Log every request."),
    ];
}

impl ServerConfig {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::leaf("address", LeafKind::Text)
            .required()
            .doc("Socket address to listen on, e.g. 127.0.0.1:8081."),
        FieldMeta::leaf("pathprefix", LeafKind::Text).doc("URL prefix for all API routes."),
        FieldMeta::leaf("dbmanagment", LeafKind::Bool)
            .doc("Expose database upload and deletion endpoints."),
        FieldMeta::leaf("cors", LeafKind::Bool).doc("Send permissive CORS headers."),
        FieldMeta::optional_record("auth", AuthConfig::FIELDS)
            .doc("Basic-auth credentials. Absent means no authentication."),
    ];
}

impl AuthConfig {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::leaf("username", LeafKind::Text).required(),
        FieldMeta::leaf("password", LeafKind::Text).required(),
    ];
}

impl PathsConfig {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::leaf("databases", LeafKind::Text)
            .required()
            .doc("Directory holding the search databases."),
        FieldMeta::leaf("results", LeafKind::Text)
            .required()
            .doc("Directory where job results are written."),
        FieldMeta::leaf("temporary", LeafKind::Text).doc("Scratch directory for running jobs."),
        FieldMeta::leaf("mmseqs", LeafKind::Text)
            .required()
            .doc("Path to the MMseqs2 binary."),
    ];

    /// Leaves that honour the `~` anchor marker.
    pub const ANCHORED: [&'static str; 3] = ["databases", "results", "mmseqs"];
}

impl RedisConfig {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::leaf("network", LeafKind::Text).doc("Dial network, usually tcp."),
        FieldMeta::leaf("address", LeafKind::Text),
        FieldMeta::leaf("password", LeafKind::Text),
        FieldMeta::leaf("index", LeafKind::Int).doc("Database index to select."),
    ];
}

impl MailConfig {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::leaf("type", LeafKind::Text).doc("Mail transport, or \"null\" to disable."),
        FieldMeta::leaf("sender", LeafKind::Text).doc("From address."),
        FieldMeta::record("templates", MailTemplates::FIELDS),
    ];
}

impl MailTemplates {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::record("success", MailTemplate::FIELDS),
        FieldMeta::record("timeout", MailTemplate::FIELDS),
        FieldMeta::record("error", MailTemplate::FIELDS),
    ];
}

impl MailTemplate {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::leaf("subject", LeafKind::Text),
        FieldMeta::leaf("body", LeafKind::Text),
    ];
}

impl Record for ConfigRoot {
    fn fields(&self) -> &'static [FieldMeta] {
        Self::FIELDS
    }

    fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        Some(match key {
            "server" => NodeRef::Record(&self.server),
            "paths" => NodeRef::Record(&self.paths),
            "redis" => NodeRef::Record(&self.redis),
            "mail" => NodeRef::Record(&self.mail),
            "verbose" => NodeRef::Leaf(LeafValue::Bool(self.verbose)),
            _ => return None,
        })
    }

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        Some(match key {
            "server" => NodeMut::Record(&mut self.server),
            "paths" => NodeMut::Record(&mut self.paths),
            "redis" => NodeMut::Record(&mut self.redis),
            "mail" => NodeMut::Record(&mut self.mail),
            "verbose" => NodeMut::Leaf(LeafMut::Bool(&mut self.verbose)),
            _ => return None,
        })
    }
}

impl Record for ServerConfig {
    fn fields(&self) -> &'static [FieldMeta] {
        Self::FIELDS
    }

    fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        Some(match key {
            "address" => NodeRef::Leaf(LeafValue::Text(self.address.clone())),
            "pathprefix" => NodeRef::Leaf(LeafValue::Text(self.path_prefix.clone())),
            "dbmanagment" => NodeRef::Leaf(LeafValue::Bool(self.db_management)),
            "cors" => NodeRef::Leaf(LeafValue::Bool(self.cors)),
            "auth" => NodeRef::Optional(self.auth.record()),
            _ => return None,
        })
    }

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        Some(match key {
            "address" => NodeMut::Leaf(LeafMut::Text(&mut self.address)),
            "pathprefix" => NodeMut::Leaf(LeafMut::Text(&mut self.path_prefix)),
            "dbmanagment" => NodeMut::Leaf(LeafMut::Bool(&mut self.db_management)),
            "cors" => NodeMut::Leaf(LeafMut::Bool(&mut self.cors)),
            "auth" => NodeMut::Optional(&mut self.auth),
            _ => return None,
        })
    }
}

impl Record for AuthConfig {
    fn fields(&self) -> &'static [FieldMeta] {
        Self::FIELDS
    }

    fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        Some(match key {
            "username" => NodeRef::Leaf(LeafValue::Text(self.username.clone())),
            "password" => NodeRef::Leaf(LeafValue::Text(self.password.clone())),
            _ => return None,
        })
    }

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        Some(match key {
            "username" => NodeMut::Leaf(LeafMut::Text(&mut self.username)),
            "password" => NodeMut::Leaf(LeafMut::Text(&mut self.password)),
            _ => return None,
        })
    }
}

impl Record for PathsConfig {
    fn fields(&self) -> &'static [FieldMeta] {
        Self::FIELDS
    }

    fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        let value = match key {
            "databases" => &self.databases,
            "results" => &self.results,
            "temporary" => &self.temporary,
            "mmseqs" => &self.mmseqs,
            _ => return None,
        };
        Some(NodeRef::Leaf(LeafValue::Text(value.clone())))
    }

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        let slot = match key {
            "databases" => &mut self.databases,
            "results" => &mut self.results,
            "temporary" => &mut self.temporary,
            "mmseqs" => &mut self.mmseqs,
            _ => return None,
        };
        Some(NodeMut::Leaf(LeafMut::Text(slot)))
    }
}

impl Record for RedisConfig {
    fn fields(&self) -> &'static [FieldMeta] {
        Self::FIELDS
    }

    fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        Some(match key {
            "network" => NodeRef::Leaf(LeafValue::Text(self.network.clone())),
            "address" => NodeRef::Leaf(LeafValue::Text(self.address.clone())),
            "password" => NodeRef::Leaf(LeafValue::Text(self.password.clone())),
            "index" => NodeRef::Leaf(LeafValue::Int(self.index)),
            _ => return None,
        })
    }

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        Some(match key {
            "network" => NodeMut::Leaf(LeafMut::Text(&mut self.network)),
            "address" => NodeMut::Leaf(LeafMut::Text(&mut self.address)),
            "password" => NodeMut::Leaf(LeafMut::Text(&mut self.password)),
            "index" => NodeMut::Leaf(LeafMut::Int(&mut self.index)),
            _ => return None,
        })
    }
}

impl Record for MailConfig {
    fn fields(&self) -> &'static [FieldMeta] {
        Self::FIELDS
    }

    fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        Some(match key {
            "type" => NodeRef::Leaf(LeafValue::Text(self.transport.clone())),
            "sender" => NodeRef::Leaf(LeafValue::Text(self.sender.clone())),
            "templates" => NodeRef::Record(&self.templates),
            _ => return None,
        })
    }

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        Some(match key {
            "type" => NodeMut::Leaf(LeafMut::Text(&mut self.transport)),
            "sender" => NodeMut::Leaf(LeafMut::Text(&mut self.sender)),
            "templates" => NodeMut::Record(&mut self.templates),
            _ => return None,
        })
    }
}

impl Record for MailTemplates {
    fn fields(&self) -> &'static [FieldMeta] {
        Self::FIELDS
    }

    fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        let template = match key {
            "success" => &self.success,
            "timeout" => &self.timeout,
            "error" => &self.error,
            _ => return None,
        };
        Some(NodeRef::Record(template))
    }

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        let template = match key {
            "success" => &mut self.success,
            "timeout" => &mut self.timeout,
            "error" => &mut self.error,
            _ => return None,
        };
        Some(NodeMut::Record(template))
    }
}

impl Record for MailTemplate {
    fn fields(&self) -> &'static [FieldMeta] {
        Self::FIELDS
    }

    fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        Some(match key {
            "subject" => NodeRef::Leaf(LeafValue::Text(self.subject.clone())),
            "body" => NodeRef::Leaf(LeafValue::Text(self.body.clone())),
            _ => return None,
        })
    }

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        Some(match key {
            "subject" => NodeMut::Leaf(LeafMut::Text(&mut self.subject)),
            "body" => NodeMut::Leaf(LeafMut::Text(&mut self.body)),
            _ => return None,
        })
    }
}
