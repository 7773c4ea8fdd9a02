// Application layer: wires parsed CLI input to the engines and renders their results.

pub mod runner;
