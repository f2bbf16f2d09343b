pub mod capture;
pub mod client;
pub mod config;
pub mod errors;
pub mod events;
pub mod line_reader;
pub mod logging;

#[doc(hidden)]
mod macros;
pub mod prelude;
pub mod requests;
pub mod resolver;
pub mod responses;
pub mod scope;
pub mod session;
pub mod source_map;
pub mod types;
pub mod waiter;

#[cfg(test)]
pub(crate) mod test_utils;
