//! Scripted card responses shared by the integration tests

#![allow(dead_code)]

use hex_literal::hex;
use simauth_apdu_core::CardExecutor;
use simauth_apdu_core::transport::MockTransport;
use simauth_usim::Usim;

pub const USIM_AID: [u8; 16] = hex!("A0000000871002FF44FF128900000100");

/// EF_DIR record of a 3G USIM application
pub const USIM_RECORD: [u8; 38] = hex!(
    "61184F10A0000000871002FF44FF1289000001"
    "0050045553494DFFFFFFFFFFFFFFFFFFFFFFFF"
);

/// EF_DIR record of an ISIM application
pub const ISIM_RECORD: [u8; 38] = hex!(
    "61184F10A0000000871004FF49FF0589000001"
    "0050044953494DFFFFFFFFFFFFFFFFFFFFFFFF"
);

/// Response script builder
#[derive(Debug, Default)]
pub struct Script {
    responses: Vec<Vec<u8>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// A raw response
    pub fn raw(mut self, response: &[u8]) -> Self {
        self.responses.push(response.to_vec());
        self
    }

    /// A data response followed by `90 00`
    pub fn data(mut self, payload: &[u8]) -> Self {
        let mut response = payload.to_vec();
        response.extend_from_slice(&hex!("9000"));
        self.responses.push(response);
        self
    }

    /// SELECT answered with `sw1 xx`, then the FCP of a file of `size` bytes
    pub fn selected_with(self, sw1: u8, size: u16) -> Self {
        let fcp = fcp(size);
        self.raw(&[sw1, fcp.len() as u8]).data(&fcp)
    }

    /// USIM-style successful selection
    pub fn selected(self, size: u16) -> Self {
        self.selected_with(0x61, size)
    }

    /// Record length query answered `6C len`, then the record
    pub fn record(self, record: &[u8]) -> Self {
        self.raw(&[0x6C, record.len() as u8]).data(record)
    }

    /// EF_DIR walk that finds the USIM application in record 1
    pub fn discovery(self) -> Self {
        self.selected(0).selected(0).record(&USIM_RECORD)
    }

    pub fn mock(self) -> MockTransport {
        MockTransport::with_responses(self.responses)
    }
}

/// Minimal FCP carrying a file size, status word excluded
pub fn fcp(size: u16) -> Vec<u8> {
    let [hi, lo] = size.to_be_bytes();
    vec![0x62, 0x08, 0x82, 0x02, 0x41, 0x21, 0x80, 0x02, hi, lo]
}

/// SELECT by file id under `cla`
pub fn select(cla: u8, id: u16) -> Vec<u8> {
    let [hi, lo] = id.to_be_bytes();
    vec![cla, 0xA4, 0x00, 0x00, 0x02, hi, lo]
}

/// SELECT of the USIM application
pub fn select_usim_aid() -> Vec<u8> {
    let mut command = hex!("00A4040010").to_vec();
    command.extend_from_slice(&USIM_AID);
    command
}

/// GET RESPONSE for the FCP produced by [`fcp`]
pub fn get_fcp(cla: u8) -> Vec<u8> {
    vec![cla, 0xC0, 0x00, 0x00, 0x0A]
}

/// Commands of a successful [`Script::discovery`]
pub fn discovery_commands() -> Vec<Vec<u8>> {
    vec![
        select(0x00, 0x3F00),
        get_fcp(0x00),
        select(0x00, 0x2F00),
        get_fcp(0x00),
        hex!("00B20104").to_vec(),
        hex!("00B2010426").to_vec(),
    ]
}

/// Commands sent so far, as plain vectors
pub fn sent(mock: &MockTransport) -> Vec<Vec<u8>> {
    mock.commands().iter().map(|c| c.to_vec()).collect()
}

pub fn card(mock: &MockTransport) -> Usim<CardExecutor<MockTransport>> {
    Usim::new(mock.clone())
}
