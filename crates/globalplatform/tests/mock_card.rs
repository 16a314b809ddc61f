//! GlobalPlatform commands exchanged with a simulated card

use apdu_bertlv::{Object, TlvReader};
use apdu_core::{Bytes, CardTransport, Status, TransportError};
use apdu_globalplatform::constants::{get_status_p1, ins, status, tags};
use apdu_globalplatform::{GpCommand, Privileges, parse_applications, send_on_transport};
use hex_literal::hex;

const ISD: [u8; 8] = hex!("A000000151000000");
const APPLET: [u8; 7] = hex!("A0000000030000");

/// Card holding a registry of applications, answering SELECT, GET STATUS and DELETE
#[derive(Debug)]
struct MockCard {
    applications: Vec<(Vec<u8>, u8, [u8; 3])>,
    selected: Option<Vec<u8>>,
    received: Vec<Vec<u8>>,
}

impl MockCard {
    fn new() -> Self {
        Self {
            applications: vec![
                (ISD.to_vec(), 0x0F, hex!("9E 00 00")),
                (APPLET.to_vec(), 0x07, hex!("00 00 00")),
            ],
            selected: None,
            received: Vec::new(),
        }
    }

    fn registry_entry(aid: &[u8], lifecycle: u8, privileges: [u8; 3]) -> Vec<u8> {
        let mut template = Object::new(tags::AID, aid.to_vec()).to_bytes();
        template.extend(Object::new(tags::LIFE_CYCLE_STATE, vec![lifecycle]).to_bytes());
        template.extend(Object::new(tags::PRIVILEGES, privileges.to_vec()).to_bytes());
        Object::new(tags::REGISTRY_ENTRY, template).to_bytes()
    }

    fn respond(&mut self, command: &[u8]) -> Vec<u8> {
        let (header, body) = command.split_at(4);
        let data = match body {
            [lc, rest @ ..] if !rest.is_empty() => &rest[..usize::from(*lc)],
            _ => &[][..],
        };
        match header[1] {
            ins::SELECT => {
                if self.applications.iter().any(|(aid, ..)| aid == data) {
                    self.selected = Some(data.to_vec());
                    hex!("6F00 9000").to_vec()
                } else {
                    hex!("6A82").to_vec()
                }
            }
            ins::GET_STATUS if self.selected.as_deref() == Some(&ISD[..]) => {
                let filter = TlvReader::from_slice(data).read().unwrap();
                let mut out = Vec::new();
                for (aid, lifecycle, privileges) in &self.applications {
                    if filter.value.is_empty() || filter.value == aid[..] {
                        out.extend(Self::registry_entry(aid, *lifecycle, *privileges));
                    }
                }
                if out.is_empty() {
                    return status::REFERENCED_DATA_NOT_FOUND.to_u16().to_be_bytes().to_vec();
                }
                out.extend_from_slice(&hex!("9000"));
                out
            }
            ins::DELETE if self.selected.as_deref() == Some(&ISD[..]) => {
                let target = TlvReader::from_slice(data).read().unwrap();
                let before = self.applications.len();
                self.applications.retain(|(aid, ..)| target.value != aid[..]);
                if self.applications.len() < before {
                    hex!("00 9000").to_vec()
                } else {
                    hex!("6A88").to_vec()
                }
            }
            ins::GET_STATUS | ins::DELETE => {
                status::SECURITY_CONDITION_NOT_SATISFIED.to_u16().to_be_bytes().to_vec()
            }
            _ => hex!("6D00").to_vec(),
        }
    }
}

impl CardTransport for MockCard {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.received.push(command.to_vec());
        Ok(Bytes::from(self.respond(command)))
    }
}

#[test]
fn test_select_then_list_applications() {
    let mut card = MockCard::new();

    let response = send_on_transport(Some(&mut card), &GpCommand::select(ISD)).unwrap();
    assert!(response.is_success());
    assert_eq!(card.received[0], hex!("00A4040008A00000015100000000"));

    let command = GpCommand::get_status(get_status_p1::APPLICATIONS, []);
    let response = send_on_transport(Some(&mut card), &command).unwrap();
    let data = response.into_result().unwrap();

    let apps = parse_applications(&data).unwrap();
    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0].aid.as_ref(), ISD);
    assert!(apps[0].privileges.contains(Privileges::CARD_LOCK | Privileges::SECURITY_DOMAIN));
    assert_eq!(apps[1].aid.as_ref(), APPLET);
    assert_eq!(apps[1].lifecycle, 0x07);
    assert!(apps[1].privileges.is_empty());
}

#[test]
fn test_get_status_filtered_by_aid() {
    let mut card = MockCard::new();
    send_on_transport(Some(&mut card), &GpCommand::select(ISD)).unwrap();

    let command = GpCommand::get_status(get_status_p1::APPLICATIONS, APPLET);
    let data = send_on_transport(Some(&mut card), &command)
        .unwrap()
        .into_result()
        .unwrap();
    let apps = parse_applications(&data).unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].aid.as_ref(), APPLET);
}

#[test]
fn test_delete_reports_status() {
    let mut card = MockCard::new();
    send_on_transport(Some(&mut card), &GpCommand::select(ISD)).unwrap();

    let response = send_on_transport(Some(&mut card), &GpCommand::delete(APPLET, true)).unwrap();
    assert!(response.is_success());

    // Second delete finds nothing
    let response = send_on_transport(Some(&mut card), &GpCommand::delete(APPLET, true)).unwrap();
    assert_eq!(response.status(), status::REFERENCED_DATA_NOT_FOUND);
    assert!(matches!(response.identify(), Status::CheckError(_)));

    let command = GpCommand::get_status(get_status_p1::APPLICATIONS, APPLET);
    let error = send_on_transport(Some(&mut card), &command)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(error.has_status(0x6A88));
}

#[test]
fn test_management_requires_security_domain() {
    let mut card = MockCard::new();
    send_on_transport(Some(&mut card), &GpCommand::select(APPLET)).unwrap();

    let command = GpCommand::get_status(get_status_p1::APPLICATIONS, []);
    let response = send_on_transport(Some(&mut card), &command).unwrap();
    assert_eq!(response.status(), status::SECURITY_CONDITION_NOT_SATISFIED);
    assert_eq!(
        response.into_result().unwrap_err().to_string(),
        "APDU checking error: Security status not satisfied (69 82)"
    );
}

#[test]
fn test_unknown_application() {
    let mut card = MockCard::new();
    let response =
        send_on_transport(Some(&mut card), &GpCommand::select(hex!("A0FFFFFFFF"))).unwrap();
    assert_eq!(response.status_word(), 0x6A82);
    assert!(!response.is_success());
}
