use libntag::Error;
use libntag::transport::envelope::{strip_status_word, unwrap_native, wrap_native};

#[test]
fn wraps_fast_read_for_direct_transmit() {
    let apdu = wrap_native(&[0x3A, 0x00, 0x3E]).unwrap();
    assert_eq!(
        apdu,
        hex::decode("ff00000005d4423a003e").unwrap()
    );
}

#[test]
fn unwraps_tag_reply() {
    let resp = hex::decode("d5430080809000").unwrap();
    assert_eq!(unwrap_native(&resp).unwrap(), vec![0x80, 0x80]);
}

#[test]
fn pn532_timeout_status() {
    let resp = hex::decode("d543019000").unwrap();
    assert_eq!(unwrap_native(&resp), Err(Error::Timeout));
}

#[test]
fn other_pn532_status_is_io() {
    let resp = hex::decode("d543029000").unwrap();
    assert!(matches!(unwrap_native(&resp), Err(Error::Io(_))));
}

#[test]
fn bad_status_word_is_io() {
    assert!(matches!(
        strip_status_word(&[0xD5, 0x43, 0x00, 0x63, 0x00]),
        Err(Error::Io(_))
    ));
    assert!(matches!(
        strip_status_word(&[0x90]),
        Err(Error::InvalidLength { .. })
    ));
}

#[test]
fn wrong_response_prefix() {
    let resp = hex::decode("d541009000").unwrap();
    assert!(matches!(
        unwrap_native(&resp),
        Err(Error::UnexpectedResponse(_))
    ));
}
