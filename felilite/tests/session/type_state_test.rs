#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use felilite::Error;
use felilite::session::Session;
use felilite::tag::Technology;
use felilite::test_support::{SimulatedFelicaLite, SimulatedNdef, SimulatedTag};
use felilite::transport::Transport;

fn felica_tag() -> SimulatedTag {
    SimulatedTag::felica_lite(SimulatedFelicaLite::new(common::fixtures::sample_idm()))
}

#[test]
fn acquire_connect_close() {
    common::init_logging();
    let mut tag = felica_tag();
    {
        let session = Session::acquire(&mut tag)
            .unwrap()
            .with_timeout(Duration::from_millis(150));
        let session = session.connect().unwrap();
        assert_eq!(session.idm(), &common::fixtures::sample_idm());
        assert!(session.is_felica_lite_system());
        assert!(session.card_info().is_felica_lite());
        session.close().unwrap();
    }

    let card = tag.felica.as_ref().unwrap();
    assert!(!card.is_open());
    assert_eq!(card.close_calls, 1);
    assert_eq!(card.timeout, Some(Duration::from_millis(150)));
}

#[test]
fn acquire_requires_nfc_f() {
    let mut tag = SimulatedTag::ndef(SimulatedNdef::new());
    assert!(matches!(
        Session::acquire(&mut tag),
        Err(Error::UnsupportedCardType(_))
    ));
}

#[test]
fn acquire_refuses_open_link() {
    let mut tag = felica_tag();
    tag.felica.as_mut().unwrap().open().unwrap();
    assert!(matches!(
        Session::acquire(&mut tag),
        Err(Error::SessionState(_))
    ));
}

#[test]
fn acquire_rejects_short_identifier() {
    let mut tag = felica_tag();
    tag.id.truncate(7);
    assert!(matches!(
        Session::acquire(&mut tag),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn listed_technology_without_handle_is_unsupported() {
    let mut tag = SimulatedTag::ndef(SimulatedNdef::new()).with_technology(Technology::NfcF);
    assert!(matches!(
        Session::acquire(&mut tag),
        Err(Error::UnsupportedCardType(_))
    ));
}

#[test]
fn dropping_connected_session_closes_link() {
    let mut tag = felica_tag();
    {
        let _session = Session::acquire(&mut tag).unwrap().connect().unwrap();
    }
    assert!(!tag.felica.as_ref().unwrap().is_open());
}
