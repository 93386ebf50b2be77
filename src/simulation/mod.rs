//! Simulation orchestration: loader/exporter ports, service facade and run reports

pub mod ports;
pub mod report;
pub mod service;

pub use ports::{FileGridExporter, FileGridLoader, GridExporter, GridLoader};
pub use report::RunReport;
pub use service::SimulationService;
