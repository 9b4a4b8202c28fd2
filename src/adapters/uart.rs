//! ESP-IDF UART transport.
//!
//! Installs the IDF UART driver on the bridge UART (8N1, no flow control)
//! and reads one byte at a time with an infinite timeout. The host tool
//! talks to this port directly.

#![cfg(target_os = "espidf")]

use core::ffi::c_void;

use esp_idf_sys::*;
use log::debug;

use crate::app::ports::ByteTransport;
use crate::error::TransportError;
use crate::pins;

const RX_BUF_LEN: i32 = 256;
/// FreeRTOS `portMAX_DELAY`.
const WAIT_FOREVER: TickType_t = TickType_t::MAX;
/// IDF `UART_PIN_NO_CHANGE`.
const PIN_NO_CHANGE: i32 = -1;

pub struct UartTransport {
    port: uart_port_t,
}

impl UartTransport {
    /// Configure and install the driver. Called once from bring-up.
    pub fn install(baud_rate: u32) -> Result<Self, TransportError> {
        let port = pins::BRIDGE_UART_NUM;
        let cfg = uart_config_t {
            baud_rate: baud_rate as i32,
            data_bits: uart_word_length_t_UART_DATA_8_BITS,
            parity: uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };

        // SAFETY: called once from the single-threaded bring-up path.
        unsafe {
            let ret = uart_param_config(port, &cfg);
            if ret != ESP_OK as i32 {
                return Err(TransportError::Uart(ret));
            }

            let ret = uart_set_pin(
                port,
                pins::UART_TX_GPIO,
                pins::UART_RX_GPIO,
                PIN_NO_CHANGE,
                PIN_NO_CHANGE,
            );
            if ret != ESP_OK as i32 {
                return Err(TransportError::Uart(ret));
            }

            let ret = uart_driver_install(port, RX_BUF_LEN, 0, 0, core::ptr::null_mut(), 0);
            if ret != ESP_OK as i32 {
                return Err(TransportError::Uart(ret));
            }
        }

        debug!("uart: UART{} installed at {} baud", port, baud_rate);
        Ok(Self { port })
    }
}

impl ByteTransport for UartTransport {
    type Error = TransportError;

    fn receive_byte(&mut self) -> Result<u8, TransportError> {
        let mut byte = 0u8;
        loop {
            // SAFETY: driver installed in `install`; buffer is one valid byte.
            let n = unsafe {
                uart_read_bytes(self.port, (&raw mut byte).cast::<c_void>(), 1, WAIT_FOREVER)
            };
            match n {
                1 => return Ok(byte),
                0 => continue,
                rc => return Err(TransportError::Uart(rc)),
            }
        }
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        // SAFETY: driver installed in `install`; source is one valid byte.
        let n = unsafe { uart_write_bytes(self.port, (&raw const byte).cast::<c_void>(), 1) };
        if n == 1 { Ok(()) } else { Err(TransportError::Uart(n)) }
    }
}
