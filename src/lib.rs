//! Layered configuration for the MMseqs2 web service. Load a document, layer
//! environment and command-line overrides on top, and hand the server a typed
//! tree.
//!
//! ```ignore
//! let config = ConfigLoader::builder()
//!     .file("/etc/mmseqs-web/config.json")
//!     .args(std::env::args().skip(1))
//!     .load()?;
//! ```
//!
//! That call reads the file, checks its required fields, resolves `~` paths
//! against the file's directory, applies `MMSEQS_WEB__*` variables and then
//! the `-path value` tokens, and returns a [`ConfigRoot`].
//!
//! # The tree
//!
//! [`ConfigRoot`] has five sections: `server`, `paths`, `redis`, `mail` and
//! the top-level `verbose` flag. Keys are the serialized names (`pathprefix`,
//! `dbmanagment`, `mail.type`), so documents, overrides, environment
//! variables and the listing all spell a field the same way.
//!
//! Every record carries a static field table ([`schema::FieldMeta`]) naming
//! its keys, their leaf types, their doc lines and which of them are
//! required. The tables drive validation, override resolution, the listing,
//! and `--get`; serde handles the document itself.
//!
//! `server.auth` is the one optional record. It is absent unless the
//! document has it or an override writes into it, and its required fields
//! are only checked when it is present.
//!
//! # Layer precedence
//!
//! ```text
//! Document              embedded default or a file; validated, `~` resolved
//!        ↑ overridden by
//! Environment vars      PREFIX__SECTION__KEY, in variable-name order
//!        ↑ overridden by
//! Override tokens       -section.key value, left to right
//! ```
//!
//! Required fields are checked against the document alone. Overrides may
//! target any leaf, required or not, which is how credentials are usually
//! supplied at launch:
//!
//! ```text
//! mmseqs-web-config -- -server.auth.username alice -server.auth.password s3cr3t
//! ```
//!
//! # Override tokens
//!
//! Tokens alternate flag and value. A flag starts with one or more dashes
//! that are stripped to form the dotted path; the value is the next token.
//! A flag followed by another flag, a value without a flag, or a trailing
//! flag is an [`ConfigError::ArgumentSyntax`].
//!
//! Pairs are applied left to right as they are read, and the first error of
//! any kind stops the run. Pairs before it stay applied.
//!
//! Each value is coerced to the leaf's type: booleans accept
//! `true`/`t`/`1` and `false`/`f`/`0` in any case, integers parse in
//! decimal. A path that names no field, runs past a leaf, or stops at a
//! section is rejected before the tree is touched.
//!
//! # Paths
//!
//! `paths.databases`, `paths.results` and `paths.mmseqs` may start with `~`
//! to mean "relative to the anchor": the executable's directory for the
//! embedded default, the file's directory for a config file. Only document
//! values are resolved this way; an override is used exactly as given.
//!
//! # Strict mode
//!
//! Off by default: unknown document keys are logged as warnings. With
//! [`.strict(true)`](ConfigLoaderBuilder::strict) they fail the load with
//! the origin, key name and line number:
//!
//! ```text
//! Unknown key 'server.adress' in /etc/mmseqs-web/config.json (line 3)
//! ```
//!
//! # Error handling
//!
//! All fallible operations return [`ConfigError`]. With the `rich-errors`
//! feature the errors also implement `miette::Diagnostic`.

pub mod error;
pub mod schema;
pub mod tree;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod coerce;
mod env;
mod file;
mod load;
mod ops;
mod overrides;
mod paths;
mod resolve;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{ConfigLoader, ConfigLoaderBuilder, DEFAULT_ENV_PREFIX};
#[cfg(feature = "clap")]
pub use cli::{FormatArg, LaunchArgs};
pub use error::ConfigError;
pub use file::{default_config, read_config_file};
pub use load::{ANCHOR_MARKER, load};
pub use ops::{ConfigResult, NOT_SET};
pub use overrides::{apply_overrides, parse_args, set_value, valid_keys};
pub use tree::{
    AuthConfig, ConfigRoot, DEFAULT_DOCUMENT, MailConfig, MailTemplate, MailTemplates,
    PathsConfig, RedisConfig, ServerConfig,
};
pub use types::{ConfigAction, Format, Source};
