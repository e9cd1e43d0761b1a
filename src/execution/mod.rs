//! Request execution layer: building requests and handing them to a transport.

pub mod http;
