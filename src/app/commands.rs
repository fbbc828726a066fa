//! Command chain parsing.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::classification::Classification;
use crate::error_handling::CommandError;

/// Classifications a `load-<classification>` batch may assign.
const LOADABLE: [Classification; 4] = [
    Classification::Disposable,
    Classification::Regular,
    Classification::Alias,
    Classification::Dead,
];

/// One step of a command chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve one domain and print its record
    Query(String),
    /// Resolve a batch and export it as a standalone report
    Classify(String),
    /// Resolve a batch into the store
    Load(String),
    /// Enter a batch with a known classification
    LoadClassified {
        classification: Classification,
        file: String,
    },
    /// Drop every record
    Reset,
    /// Print all disposable domains
    DumpDisposables,
    /// Switch the store file
    UseDb(PathBuf),
    /// Re-read the store file
    LoadDb,
    /// Write the store file
    StoreDb,
    /// Switch the report destination
    Out(String),
    /// Print registrant organizations for a batch
    Whois(String),
}

impl Command {
    /// Whether running this command may change the in-memory store.
    pub fn modifies_store(&self) -> bool {
        matches!(
            self,
            Command::Query(_)
                | Command::Classify(_)
                | Command::Load(_)
                | Command::LoadClassified { .. }
                | Command::Reset
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Query(domain) => write!(f, "query {domain}"),
            Command::Classify(file) => write!(f, "classify {file}"),
            Command::Load(file) => write!(f, "load {file}"),
            Command::LoadClassified {
                classification,
                file,
            } => write!(
                f,
                "load-{} {file}",
                classification.as_ref().to_ascii_lowercase()
            ),
            Command::Reset => write!(f, "reset"),
            Command::DumpDisposables => write!(f, "dump-disposables"),
            Command::UseDb(path) => write!(f, "use-db {}", path.display()),
            Command::LoadDb => write!(f, "load-db"),
            Command::StoreDb => write!(f, "store-db"),
            Command::Out(path) => write!(f, "out {path}"),
            Command::Whois(file) => write!(f, "whois {file}"),
        }
    }
}

/// Parses a whole command chain before anything runs.
///
/// # Errors
///
/// Returns a `CommandError` for an empty chain, an unknown command, a
/// `load-<classification>` naming a classification that cannot be loaded,
/// or a command missing its argument.
pub fn parse_commands(args: &[String]) -> Result<Vec<Command>, CommandError> {
    if args.is_empty() {
        return Err(CommandError::Empty);
    }

    let mut commands = Vec::new();
    let mut args = args.iter();
    while let Some(name) = args.next() {
        let mut argument = || {
            args.next()
                .cloned()
                .ok_or_else(|| CommandError::MissingArgument(name.clone()))
        };

        let command = match name.as_str() {
            "query" => Command::Query(argument()?),
            "classify" => Command::Classify(argument()?),
            "load" => Command::Load(argument()?),
            "reset" => Command::Reset,
            "dump-disposables" => Command::DumpDisposables,
            "use-db" => Command::UseDb(PathBuf::from(argument()?)),
            "load-db" => Command::LoadDb,
            "store-db" => Command::StoreDb,
            "out" => Command::Out(argument()?),
            "whois" => Command::Whois(argument()?),
            other => match other.strip_prefix("load-") {
                Some(suffix) => {
                    let classification = loadable_classification(suffix)?;
                    Command::LoadClassified {
                        classification,
                        file: argument()?,
                    }
                }
                None => return Err(CommandError::UnknownCommand(other.to_string())),
            },
        };
        commands.push(command);
    }
    Ok(commands)
}

fn loadable_classification(name: &str) -> Result<Classification, CommandError> {
    Classification::from_str(name)
        .ok()
        .filter(|classification| LOADABLE.contains(classification))
        .ok_or_else(|| CommandError::UnknownClassification(name.to_string()))
}
