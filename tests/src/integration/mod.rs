//! Cross-crate integration flows.

mod deployment_flow;
mod pipeline_flow;
mod registration_flow;
