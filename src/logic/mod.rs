pub mod alerts;
pub mod chatbot;
pub mod feed;
pub mod monitor;
pub mod report;
pub mod report_service;
pub mod safety;

pub use alerts::AlertEvaluator;
pub use chatbot::ChatSession;
pub use feed::SimulatedFeed;
pub use monitor::{MonitorEvent, MonitorSchedule, WeatherMonitor};
pub use report::ReportComposer;
pub use report_service::ReportService;
