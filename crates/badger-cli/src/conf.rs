//! Namecoin `bitcoin.conf` reader.
//!
//! `key=value` lines. Only the RPC keys are read; everything else, comments,
//! and `[section]` headers are skipped. A later assignment overrides an
//! earlier one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use badger::resolve::{NameServiceConfig, DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};
use thiserror::Error;

/// Location of the config file relative to `$HOME`.
pub const DEFAULT_CONF: &str = ".namecoin/bitcoin.conf";

#[derive(Debug, Error)]
pub enum ConfError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: rpcport {value:?} is not a port number")]
    InvalidPort { line: usize, value: String },
}

/// RPC settings found in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamecoinConf {
    pub rpcconnect: Option<String>,
    pub rpcport: Option<u16>,
    pub rpcuser: Option<String>,
    pub rpcpassword: Option<String>,
}

impl NamecoinConf {
    pub fn parse(text: &str) -> Result<Self, ConfError> {
        let mut conf = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "rpcconnect" => conf.rpcconnect = Some(value.to_owned()),
                "rpcuser" => conf.rpcuser = Some(value.to_owned()),
                "rpcpassword" => conf.rpcpassword = Some(value.to_owned()),
                "rpcport" => {
                    let port = value.parse().map_err(|_| ConfError::InvalidPort {
                        line: index + 1,
                        value: value.to_owned(),
                    })?;
                    conf.rpcport = Some(port);
                }
                _ => {}
            }
        }

        Ok(conf)
    }

    /// Read and parse `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// `$HOME/.namecoin/bitcoin.conf`, or the relative path without `$HOME`.
    pub fn default_path() -> PathBuf {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(DEFAULT_CONF))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONF))
    }

    pub fn into_config(self) -> NameServiceConfig {
        let host = self.rpcconnect.as_deref().unwrap_or(DEFAULT_RPC_HOST);
        let port = self.rpcport.unwrap_or(DEFAULT_RPC_PORT);
        let config = NameServiceConfig::from_host_port(host, port);
        match self.rpcuser {
            Some(user) => config.with_credentials(user, self.rpcpassword),
            None => config,
        }
    }
}
