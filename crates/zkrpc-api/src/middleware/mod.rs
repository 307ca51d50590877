//! Middleware layers: request metrics. Request tracing is `tower-http`'s
//! `TraceLayer`, installed in [`crate::app`].

pub mod metrics;
