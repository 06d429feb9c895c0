// Interface adapters: port implementations, input sources and the wire format
// for the headless runner.

pub mod effects;
pub mod output;
pub mod physics;
pub mod pilot;
pub mod protocol;
