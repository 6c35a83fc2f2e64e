//! Plain data: movie records, URL parameters and the published view snapshot.

pub mod movie;
pub mod query;
pub mod view;

pub use movie::*;
pub use query::*;
pub use view::*;
