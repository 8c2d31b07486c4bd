pub mod errors;
pub mod sequencer;
