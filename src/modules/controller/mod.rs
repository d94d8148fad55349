mod controller;
mod modbus_conf;
mod modbus_controller;

pub(crate) use controller::*;
pub(crate) use modbus_conf::*;
pub(crate) use modbus_controller::*;
