pub mod alert;
pub mod chat;
pub mod document;
pub mod forecast;
pub mod location;
pub mod report;
pub mod weather;

pub use alert::*;
pub use chat::*;
pub use document::*;
pub use forecast::*;
pub use location::*;
pub use report::*;
pub use weather::*;
