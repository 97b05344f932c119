//! Plain data carried between the topology scanner and the color sinks.

pub mod record;
pub mod selector;
