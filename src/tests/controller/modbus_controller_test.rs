use std::{
    io::{Read, Write},
    net::TcpListener,
    sync::Once,
    thread::JoinHandle,
};

use crate::modules::{
    ControllerError, ControllerSession, ControllerStatus, ModbusConf, ModbusController,
};
///
///
static INIT: Once = Once::new();
///
/// once called initialisation
fn init_once() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    })
}
///
/// returns:
///  - ...
fn init_each() -> () {}
///
/// Fake controller answering `requests` messages with `reply(request)`,
/// returns its address and the requests received
fn serve(requests: usize, reply: fn(&[u8]) -> Vec<u8>) -> (String, JoinHandle<Vec<Vec<u8>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut received = vec![];
        for _ in 0..requests {
            let mut request = [0u8; 12];
            stream.read_exact(&mut request).unwrap();
            stream.write_all(&reply(&request)).unwrap();
            received.push(request.to_vec());
        }
        received
    });
    (address, handle)
}
fn conf(address: String) -> ModbusConf {
    ModbusConf { address, timeout_ms: 1000, ..ModbusConf::default() }
}
///
/// Testing [ModbusController].build_modbus_cmd_message
#[test]
fn cmd_message() {
    init_once();
    init_each();
    let test_data = [
        ((0, 0, 0, 0x06, 11, 1234), vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x06, 0x00, 0x06, 0x00, 0x0B, 0x04, 0xD2]),
        ((258, 0, 1, 0x06, 101, 1), vec![0x01, 0x02, 0x00, 0x00, 0x00, 0x06, 0x01, 0x06, 0x00, 0x65, 0x00, 0x01]),
    ];
    for ((tr_id, pr_id, unit, function, register, value), target) in test_data {
        let result = ModbusController::build_modbus_cmd_message(tr_id, pr_id, unit, function, register, value);
        assert_eq!(result, target);
    }
}
///
/// Testing [ModbusController].write_register against an echoing controller
#[test]
fn write_register_echo() {
    init_once();
    init_each();
    let (address, handle) = serve(2, |request| request.to_vec());
    let mut controller = ModbusController::new("test", conf(address));
    assert_eq!(controller.status(), ControllerStatus::Unavailable);
    assert_eq!(controller.connect(), ControllerStatus::Connected);
    assert_eq!(controller.status(), ControllerStatus::Connected);
    controller.write_register(11, 1234).unwrap();
    controller.write_register(12, 7).unwrap();
    controller.disconnect();
    assert_eq!(controller.status(), ControllerStatus::Unavailable);
    let received = handle.join().unwrap();
    assert_eq!(received[0], vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x06, 0x01, 0x06, 0x00, 0x0B, 0x04, 0xD2]);
    // transaction id advances
    assert_eq!(&received[1][..2], &[0x00, 0x01]);
}
///
/// Testing [ModbusController].write_register on an exception reply
#[test]
fn write_register_exception() {
    init_once();
    init_each();
    let (address, handle) = serve(1, |request| vec![request[0], request[1], 0x00, 0x00, 0x00, 0x03, request[6], 0x86, 0x02]);
    let mut controller = ModbusController::new("test", conf(address));
    assert_eq!(controller.connect(), ControllerStatus::Connected);
    let result = controller.write_register(11, 1234);
    assert!(matches!(result, Err(ControllerError::Exception(0x02))), "{:?}", result);
    handle.join().unwrap();
}
///
/// Testing [ModbusController].connect to a closed port
#[test]
fn connect_refused() {
    init_once();
    init_each();
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };
    let mut controller = ModbusController::new("test", conf(address));
    assert_eq!(controller.connect(), ControllerStatus::Unavailable);
    assert!(matches!(controller.write_register(1, 1), Err(ControllerError::NotConnected)));
}
