pub mod compile;
pub mod dataset;
pub mod render;
pub mod run;
pub mod utils;
