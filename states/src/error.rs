use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Command not registered: {name}")]
    CommandNotRegistered { name: &'static str },
    #[error("Entry not registered: {name}")]
    EntryNotRegistered { name: &'static str },
    #[error("No async runtime available to spawn {name}")]
    NoRuntime { name: &'static str },
}
