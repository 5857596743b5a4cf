pub mod device;
pub mod list;
pub mod output;
pub mod sensor;
