// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 lodestore contributors

//! Server registry.
//!
//! A "server" here is a named logical database bound to a directory, not a
//! network service. The registry is a plain owned value: callers construct
//! one, pass it where needed, and can hold several independent registries
//! (tests do). There is no global state and no destroy operation --
//! descriptors live for the life of the registry.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ServerStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a server. Transitions: `Init` -> `Running` via
/// [`ServerRegistry::start`], `Running` -> `Stopped` via
/// [`ServerRegistry::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// Created but not yet started.
    Init,
    /// Accepting save/read operations.
    Running,
    /// Explicitly stopped.
    Stopped,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerStatus::Init => write!(f, "init"),
            ServerStatus::Running => write!(f, "running"),
            ServerStatus::Stopped => write!(f, "stopped"),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerDescriptor
// ---------------------------------------------------------------------------

/// A registered server: unique name, absolute base directory, status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    /// Unique name across the registry.
    pub name: String,
    /// Base directory for stored collections. Canonicalized at creation.
    pub directory: PathBuf,
    /// Current lifecycle status.
    pub status: ServerStatus,
}

impl ServerDescriptor {
    /// Returns true if the server accepts save/read operations.
    pub fn is_running(&self) -> bool {
        self.status == ServerStatus::Running
    }
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors produced by server registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("server name must not be empty")]
    EmptyName,

    #[error("server directory must not be empty")]
    EmptyDirectory,

    #[error("server already registered: {0}")]
    AlreadyRegistered(String),

    #[error("server directory does not exist: {0}")]
    DirectoryMissing(PathBuf),

    #[error("failed to resolve directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// ServerRegistry
// ---------------------------------------------------------------------------

/// Owned map of server descriptors keyed by name.
#[derive(Debug, Default)]
pub struct ServerRegistry {
    servers: HashMap<String, ServerDescriptor>,
}

impl ServerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new server in `Init` status.
    ///
    /// The directory must already exist on disk; it is resolved to an
    /// absolute path before the descriptor is stored, so later save/read
    /// operations are independent of the process working directory.
    /// Returns a clone of the registered descriptor.
    pub fn create(
        &mut self,
        name: &str,
        directory: impl AsRef<Path>,
    ) -> Result<ServerDescriptor, RegistryError> {
        let directory = directory.as_ref();

        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if directory.as_os_str().is_empty() {
            return Err(RegistryError::EmptyDirectory);
        }
        if self.servers.contains_key(name) {
            return Err(RegistryError::AlreadyRegistered(name.to_string()));
        }

        let directory = fs::canonicalize(directory).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RegistryError::DirectoryMissing(directory.to_path_buf())
            } else {
                RegistryError::Io {
                    path: directory.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let descriptor = ServerDescriptor {
            name: name.to_string(),
            directory,
            status: ServerStatus::Init,
        };

        self.servers.insert(name.to_string(), descriptor.clone());
        tracing::debug!(server = name, "registered server");
        Ok(descriptor)
    }

    /// Look up a server by name.
    pub fn lookup(&self, name: &str) -> Option<&ServerDescriptor> {
        self.servers.get(name)
    }

    /// Transition a server to `Running`.
    ///
    /// An unknown name is a no-op with a diagnostic, never an error.
    pub fn start(&mut self, name: &str) -> Option<&ServerDescriptor> {
        match self.servers.get_mut(name) {
            Some(descriptor) => {
                descriptor.status = ServerStatus::Running;
                tracing::info!(server = name, "server started");
                Some(descriptor)
            }
            None => {
                tracing::warn!(server = name, "start ignored: server not registered");
                None
            }
        }
    }

    /// Transition a server to `Stopped`.
    ///
    /// An unknown name is a no-op with a diagnostic, never an error.
    pub fn stop(&mut self, name: &str) -> Option<&ServerDescriptor> {
        match self.servers.get_mut(name) {
            Some(descriptor) => {
                descriptor.status = ServerStatus::Stopped;
                tracing::info!(server = name, "server stopped");
                Some(descriptor)
            }
            None => {
                tracing::warn!(server = name, "stop ignored: server not registered");
                None
            }
        }
    }

    /// Total number of registered servers.
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    /// All registered server names (sorted for determinism).
    pub fn server_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.servers.keys().cloned().collect();
        names.sort();
        names
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
