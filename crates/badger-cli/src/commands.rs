//! Subcommand implementations. Each returns what `main` prints.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use badger::core::codec;
use badger::{Badge, Badger, Key, KeyPart};
use tracing::debug;

/// Where the signing key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Password(String),
    Encoded(String),
}

impl KeySource {
    /// From `--pass` / `--key`, prompting on stdin when neither was given.
    pub fn from_args(pass: Option<String>, key: Option<String>) -> Result<Self> {
        match (pass, key) {
            (_, Some(key)) => Ok(KeySource::Encoded(key)),
            (Some(pass), None) => Ok(KeySource::Password(pass)),
            (None, None) => Ok(KeySource::Password(read_password()?)),
        }
    }

    /// The key, with its private half.
    pub fn load(&self) -> Result<Key> {
        match self {
            KeySource::Password(password) => {
                if password.is_empty() {
                    bail!("password must not be empty");
                }
                Ok(Key::generate(password)?)
            }
            KeySource::Encoded(text) => {
                let key = Key::decode(text)?;
                if !key.has_private() {
                    return Err(badger::BadgeError::NotPrivate.into());
                }
                Ok(key)
            }
        }
    }
}

/// Read one line from stdin as the password, prompting on a terminal.
///
/// Terminal echo is left on, so the password is visible as it is typed.
/// Pipe it in (`badger key < file`) to keep it off the screen.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password (echoed): ");
        io::stderr().flush().ok();
    }
    read_password_from(&mut stdin.lock())
}

fn read_password_from(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("reading password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

/// Base64 private key.
pub fn key(source: &KeySource) -> Result<String> {
    let key = source.load()?;
    debug!(key = %key.fingerprint(), "derived key");
    Ok(key.encode(KeyPart::Private)?.as_str().to_owned())
}

/// Identity record publishing the public half.
pub fn record(source: &KeySource) -> Result<String> {
    let key = source.load()?;
    Ok(badger::core::to_record(&key)?)
}

/// Badge JSON for `id` over the base64 `token`.
pub fn badge(badger: &Badger, id: &str, token: &str, source: &KeySource) -> Result<String> {
    let token = codec::decode("token", token)?;
    let key = source.load()?;
    let badge = badger.issue(id, &token, &key)?;
    Ok(badge.to_json()?)
}

/// Whether the badge JSON verifies. `-` reads the document from stdin.
pub fn verify(badger: &Badger, json: &str) -> Result<bool> {
    let json = if json == "-" {
        io::read_to_string(io::stdin()).context("reading badge from stdin")?
    } else {
        json.to_owned()
    };
    let badge = Badge::from_json(&json)?;
    Ok(badger.verify(&badge)?)
}
