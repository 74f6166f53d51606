//! Observability setup for chatline: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
