// Adapters layer: concrete readers for external inputs (CSV batch files).

pub mod csv_input;
