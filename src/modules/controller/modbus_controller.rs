use std::{
    io::{Read, Write},
    net::{SocketAddr, TcpStream, ToSocketAddrs},
    time::Duration,
};

use crate::modules::{ControllerError, ControllerSession, ControllerStatus, ModbusConf};

///
/// Modbus function "Write Single Register"
pub const WRITE_SINGLE_REGISTER: u8 = 0x06;
const HEADER_LEN: usize = 7;

///
/// Line controller over Modbus TCP
///
/// ## Message format
///
/// ```ignore
///  Transaction ID | Protocol ID | Length Field |  Unit ID | Function Code | Data
///  ---            | ---         | ---          | ---      | ---           | ---
///   2 Bytes       | 2 Bytes     | 2 Bytes      | 1 Bytes  | 1 Byte        | Vec<u8>
/// ```
///
/// Function 06 carries the register address and the value, 2 bytes each,
/// the controller echoes the request back on success.
pub struct ModbusController {
    conf: ModbusConf,
    stream: Option<TcpStream>,
    transaction: u16,
    dbg: String,
}
//
//
impl ModbusController {
    ///
    /// Returns [ModbusController] new instance, not connected
    pub fn new(parent: impl Into<String>, conf: ModbusConf) -> Self {
        Self {
            conf,
            stream: None,
            transaction: 0,
            dbg: format!("{}/ModbusController", parent.into()),
        }
    }
    ///
    /// Build a Modbus command message
    pub fn build_modbus_cmd_message(tr_id: u16, pr_id: u16, unit: u8, function: u8, register: u16, value: u16) -> Vec<u8> {
        let mut bytes = vec![];
        bytes.extend(tr_id.to_be_bytes());
        bytes.extend(pr_id.to_be_bytes());
        bytes.extend([0x00, 0x06]);
        bytes.push(unit);
        bytes.push(function);
        bytes.extend(register.to_be_bytes());
        bytes.extend(value.to_be_bytes());
        bytes
    }
    fn timeout(&self) -> Duration {
        Duration::from_millis(self.conf.timeout_ms.max(1))
    }
    fn resolve(&self) -> std::io::Result<SocketAddr> {
        self.conf.address
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, format!("'{}' not resolved", self.conf.address)))
    }
    fn open(&self) -> std::io::Result<TcpStream> {
        let addr = self.resolve()?;
        let stream = TcpStream::connect_timeout(&addr, self.timeout())?;
        stream.set_read_timeout(Some(self.timeout()))?;
        stream.set_write_timeout(Some(self.timeout()))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }
    ///
    /// Reads one reply frame, returns its PDU
    fn read_reply(stream: &mut TcpStream) -> Result<Vec<u8>, ControllerError> {
        let mut header = [0u8; HEADER_LEN];
        stream.read_exact(&mut header)?;
        let len = u16::from_be_bytes([header[4], header[5]]) as usize;
        if len < 2 {
            return Err(ControllerError::Mismatch);
        }
        let mut pdu = vec![0u8; len - 1];
        stream.read_exact(&mut pdu)?;
        Ok(pdu)
    }
}
//
//
impl ControllerSession for ModbusController {
    fn connect(&mut self) -> ControllerStatus {
        match self.open() {
            Ok(stream) => {
                log::info!("{}.connect | Connected to {}", self.dbg, self.conf.address);
                self.stream = Some(stream);
                ControllerStatus::Connected
            }
            Err(err) => {
                log::warn!("{}.connect | Can't connect to {}: {}", self.dbg, self.conf.address, err);
                self.stream = None;
                ControllerStatus::Unavailable
            }
        }
    }
    //
    //
    fn status(&self) -> ControllerStatus {
        match self.stream {
            Some(_) => ControllerStatus::Connected,
            None => ControllerStatus::Unavailable,
        }
    }
    //
    //
    fn write_register(&mut self, register: u16, value: u16) -> Result<(), ControllerError> {
        let tr_id = self.transaction;
        self.transaction = self.transaction.wrapping_add(1);
        let unit = self.conf.unit;
        let stream = self.stream.as_mut().ok_or(ControllerError::NotConnected)?;
        let request = Self::build_modbus_cmd_message(tr_id, 0, unit, WRITE_SINGLE_REGISTER, register, value);
        stream.write_all(&request)?;
        let pdu = Self::read_reply(stream)?;
        if pdu.first() == Some(&(WRITE_SINGLE_REGISTER | 0x80)) {
            return Err(ControllerError::Exception(pdu.get(1).copied().unwrap_or_default()));
        }
        if pdu[..] != request[HEADER_LEN..] {
            return Err(ControllerError::Mismatch);
        }
        log::debug!("{}.write_register | {register} = {value}", self.dbg);
        Ok(())
    }
    //
    //
    fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.shutdown(std::net::Shutdown::Both) {
                log::debug!("{}.disconnect | Shutdown error: {}", self.dbg, err);
            }
            log::info!("{}.disconnect | Disconnected", self.dbg);
        }
    }
}
