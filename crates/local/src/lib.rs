use stratus_core::{Client, ConnectionConfig, Result, Session};

mod catalog_queries;
mod command;
mod lexer;
mod session;

pub use session::LocalSession;

pub fn connect(config: &ConnectionConfig) -> Result<Box<dyn Session>> {
    Ok(Box::new(LocalSession::open(config)?))
}

pub fn client(config: &ConnectionConfig) -> Result<Client> {
    Ok(Client::new(connect(config)?))
}
