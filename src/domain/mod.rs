// Domain layer: value records and the settings port. No dependencies beyond std/serde.

pub mod model;
pub mod ports;
