use serde::Deserialize;

///
/// ## Line controller connection
///
/// ### Conf example
/// ```yaml
/// controller:
///     address: 192.168.0.1:502
///     unit: 1
///     timeout-ms: 3000            # connect / read / write timeout
///     capture-register: 101       # optional, set to 1 while capturing, 0 after
///     holes-register: 102         # optional, receives the final hole count
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ModbusConf {
    pub address: String,
    pub unit: u8,
    pub timeout_ms: u64,
    pub capture_register: Option<u16>,
    pub holes_register: Option<u16>,
}
//
//
impl Default for ModbusConf {
    fn default() -> Self {
        Self {
            address: "192.168.0.1:502".to_owned(),
            unit: 1,
            timeout_ms: 3000,
            capture_register: None,
            holes_register: None,
        }
    }
}
