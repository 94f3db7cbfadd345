//! Identity retrieval against a scripted card

mod common;

use common::*;
use hex_literal::hex;
use simauth_apdu_core::TransportError;
use simauth_usim::{CardMode, Error, ErrorKind};

const EF_IMSI_CONTENT: [u8; 9] = hex!("082980390000000010");

#[test]
fn test_discovery_picks_usim_among_other_records() {
    let mock = Script::new()
        .selected(0)
        .selected(0)
        .record(&[0xFF; 38])
        .record(&ISIM_RECORD)
        .raw(&hex!("6A83"))
        .record(&USIM_RECORD)
        .mock();
    let mut usim = card(&mock);

    let aid = usim.discover_aid().unwrap();
    assert_eq!(aid.as_bytes(), USIM_AID);
    assert_eq!(usim.aid(), Some(&aid));

    let commands = sent(&mock);
    assert_eq!(commands.len(), 4 + 2 + 2 + 1 + 2);
    assert_eq!(commands[8], hex!("00B20304"));
    assert_eq!(commands[9], hex!("00B20404"));
    assert_eq!(commands[10], hex!("00B2040426"));
    assert_eq!(mock.remaining(), 0);

    // cached: no further commands
    usim.discover_aid().unwrap();
    assert_eq!(mock.commands().len(), 11);
}

#[test]
fn test_discovery_stops_at_first_match() {
    let mock = Script::new().discovery().mock();
    let mut usim = card(&mock);

    usim.discover_aid().unwrap();
    assert_eq!(sent(&mock), discovery_commands());
}

#[test]
fn test_discovery_exhaustion_is_not_found() {
    let mut script = Script::new().selected(0).selected(0).record(&ISIM_RECORD);
    for _ in 2..=9 {
        script = script.raw(&hex!("6A83"));
    }
    let mock = script.mock();
    let mut usim = card(&mock);

    let err = usim.discover_aid().unwrap_err();
    assert!(matches!(err, Error::AidNotFound));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(usim.aid().is_none());
    // record 10 is never read
    assert_eq!(mock.commands().len(), 4 + 2 + 8);
}

#[test]
fn test_imsi_usim_path() {
    let mock = Script::new()
        .selected(0)
        .discovery()
        .selected(0)
        .selected(9)
        .data(&EF_IMSI_CONTENT)
        .mock();
    let mut usim = card(&mock);

    assert_eq!(usim.imsi().unwrap(), "208930000000001");
    assert_eq!(usim.mode(), CardMode::Usim);

    let mut expected = vec![select(0x00, 0x3F00), get_fcp(0x00)];
    expected.extend(discovery_commands());
    expected.extend([
        select_usim_aid(),
        get_fcp(0x00),
        select(0x00, 0x6F07),
        get_fcp(0x00),
        hex!("00B0000009").to_vec(),
    ]);
    assert_eq!(sent(&mock), expected);
}

#[test]
fn test_imsi_falls_back_to_gsm() {
    let mock = Script::new()
        .raw(&hex!("6E00"))
        .selected_with(0x9F, 0)
        .selected_with(0x9F, 0)
        .selected_with(0x9F, 9)
        .data(&EF_IMSI_CONTENT)
        .mock();
    let mut usim = card(&mock);

    assert_eq!(usim.imsi().unwrap(), "208930000000001");
    assert_eq!(usim.mode(), CardMode::Gsm);
    assert_eq!(
        sent(&mock),
        vec![
            select(0x00, 0x3F00),
            select(0xA0, 0x3F00),
            get_fcp(0xA0),
            select(0xA0, 0x7F20),
            get_fcp(0xA0),
            select(0xA0, 0x6F07),
            get_fcp(0xA0),
            hex!("A0B0000009").to_vec(),
        ]
    );

    // the fallback sticks: the next read goes straight to GSM commands
    let before = mock.commands().len();
    mock.push_response(hex!("9F0A").to_vec());
    mock.push_error(TransportError::Timeout);
    let _ = usim.iccid();
    assert_eq!(mock.commands()[before].as_ref(), select(0xA0, 0x3F00));
}

#[test]
fn test_transport_failure_does_not_downgrade() {
    let mock = Script::new().mock();
    mock.push_error(TransportError::Timeout);
    let mut usim = card(&mock);

    let err = usim.imsi().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(!err.is_card_status());
    assert_eq!(usim.mode(), CardMode::Usim);
}

#[test]
fn test_iccid_keeps_parity_nibble() {
    let mock = Script::new()
        .selected(0)
        .selected(10)
        .data(&hex!("98942000000000000012"))
        .mock();
    let mut usim = card(&mock);

    assert_eq!(usim.iccid().unwrap(), "89490200000000000021");
    assert_eq!(sent(&mock)[2], select(0x00, 0x2FE2));
    assert_eq!(sent(&mock)[4], hex!("00B000000A"));
}

#[test]
fn test_short_read_is_malformed() {
    let mock = Script::new()
        .selected(0)
        .selected(10)
        .data(&hex!("9894200000"))
        .mock();
    let mut usim = card(&mock);

    let err = usim.iccid().unwrap_err();
    assert!(matches!(err, Error::MalformedRead { expected: 10, .. }));
    assert_eq!(err.kind(), ErrorKind::MalformedData);
}

fn msisdn_record() -> Vec<u8> {
    let mut record = vec![0xFF; 16];
    record.extend_from_slice(&hex!("07913366554433F2FFFFFFFFFFFF"));
    record
}

#[test]
fn test_msisdn_under_telecom() {
    let record = msisdn_record();
    let mock = Script::new()
        .selected(0)
        .selected(0)
        .selected(0)
        .record(&record)
        .mock();
    let mut usim = card(&mock);

    assert_eq!(usim.msisdn().unwrap().as_deref(), Some("33665544332"));
    let commands = sent(&mock);
    assert_eq!(commands[2], select(0x00, 0x7F10));
    assert_eq!(commands[4], select(0x00, 0x6F40));
    assert_eq!(commands[6], hex!("00B20104"));
    assert_eq!(commands[7], hex!("00B201041E"));
}

#[test]
fn test_msisdn_alternate_path() {
    let mock = Script::new()
        .selected(0)
        .raw(&hex!("6A82"))
        .selected(0)
        .selected(0)
        .selected(0)
        .record(&msisdn_record())
        .mock();
    let mut usim = card(&mock);

    assert_eq!(usim.msisdn().unwrap().as_deref(), Some("33665544332"));
    let commands = sent(&mock);
    assert_eq!(commands[3], select(0x00, 0x3F00));
    assert_eq!(commands[5], select_usim_aid());
    assert_eq!(commands[7], select(0x00, 0x6F40));
}

#[test]
fn test_msisdn_reports_original_error() {
    let mock = Script::new()
        .selected(0)
        .raw(&hex!("6A82"))
        .raw(&hex!("9804"))
        .mock();
    let mut usim = card(&mock);

    let err = usim.msisdn().unwrap_err();
    assert!(matches!(err, Error::ProtocolViolation { .. }));
    assert_eq!(err.status().map(|s| s.to_u16()), Some(0x6A82));
}

#[test]
fn test_identity_is_cached_until_close() {
    let mut unprovisioned = vec![0xFF; 16];
    unprovisioned.extend_from_slice(&[0xFF; 14]);

    let mock = Script::new()
        // IMSI
        .selected(0)
        .discovery()
        .selected(0)
        .selected(9)
        .data(&EF_IMSI_CONTENT)
        // ICCID
        .selected(0)
        .selected(10)
        .data(&hex!("98942000000000000012"))
        // MSISDN
        .selected(0)
        .selected(0)
        .selected(0)
        .record(&unprovisioned)
        .mock();
    let mut usim = card(&mock);

    let identity = usim.identity().unwrap();
    assert_eq!(identity.imsi, "208930000000001");
    assert_eq!(identity.iccid.as_deref(), Some("89490200000000000021"));
    assert_eq!(identity.msisdn, None);
    assert_eq!(identity.plmn.encode().unwrap(), (0xF208, 0xFF93));
    assert_eq!(mock.remaining(), 0);

    let count = mock.commands().len();
    assert_eq!(usim.identity().unwrap(), identity);
    assert_eq!(mock.commands().len(), count);

    usim.reset().unwrap();
    assert!(usim.aid().is_none());
    assert!(usim.identity().is_err());
}
