pub mod cli;
pub mod conf;
pub mod consumer;
pub mod logging;
pub mod model;
pub mod pipeline;
