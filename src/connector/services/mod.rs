//! Application services for connection resolution and task synchronisation.

mod resolver;
mod sync;

pub use resolver::{ConnectionError, ConnectionResolver, ConnectionResult};
pub use sync::{
    QueryError, QueryOutcome, QueryResult, QueryStats, RepositoryConnector, TransportOperation,
};
