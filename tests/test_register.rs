use lumentree_protocol::error::FieldError;
use lumentree_protocol::register::{read_ascii, read_number, RegisterDef, RegisterWidth};

#[test]
fn out_of_bounds_reads_never_panic() {
    // every (body length, address, width) combination either reads or
    // reports out-of-bounds; nothing panics
    for len in 0..190usize {
        let body = vec![0u8; len];
        for address in 0..95u16 {
            for width in [RegisterWidth::Word, RegisterWidth::DoubleWord] {
                let def = RegisterDef::unsigned(address, width, 1.0);
                let result = read_number(&body, def);
                let in_bounds = address as usize * 2 + width.bytes() <= len;
                assert_eq!(result.is_ok(), in_bounds, "len={} addr={}", len, address);
            }
        }
    }
}

#[test]
fn signed_and_unsigned_word_reads() {
    let body = [0xff, 0x6a, 0x15, 0x18];

    let unsigned = RegisterDef::unsigned(0, RegisterWidth::Word, 1.0);
    assert_eq!(read_number(&body, unsigned).unwrap(), 65386.0);

    let signed = RegisterDef::signed(0, RegisterWidth::Word, 1.0);
    assert_eq!(read_number(&body, signed).unwrap(), -150.0);

    let scaled = RegisterDef::unsigned(1, RegisterWidth::Word, 0.01);
    assert_eq!(read_number(&body, scaled).unwrap(), 54.0);
}

#[test]
fn double_word_reads_span_two_registers() {
    let body = [0x00, 0x01, 0x86, 0xa0];

    let unsigned = RegisterDef::unsigned(0, RegisterWidth::DoubleWord, 0.1);
    assert_eq!(read_number(&body, unsigned).unwrap(), 10000.0);

    let negative = [0xff, 0xff, 0xff, 0xfe];
    let signed = RegisterDef::signed(0, RegisterWidth::DoubleWord, 1.0);
    assert_eq!(read_number(&negative, signed).unwrap(), -2.0);
}

#[test]
fn non_finite_scaled_result_is_an_error() {
    let body = [0x00, 0x01];
    let def = RegisterDef::unsigned(0, RegisterWidth::Word, f64::INFINITY);
    assert_eq!(read_number(&body, def), Err(FieldError::NotFinite));
}

#[test]
fn ascii_read_strips_nuls_and_whitespace() {
    let mut body = vec![0u8; 20];
    body[6..14].copy_from_slice(b" LMT-36\x00");
    body[14] = 0xf5; // non-ASCII byte is ignored

    assert_eq!(read_ascii(&body, 3, 5).unwrap(), "LMT-36");
}

#[test]
fn ascii_read_of_blank_registers_is_an_error() {
    let body = vec![0u8; 20];
    assert_eq!(read_ascii(&body, 3, 5), Err(FieldError::EmptyString));

    let short = vec![0u8; 8];
    assert!(matches!(
        read_ascii(&short, 3, 5),
        Err(FieldError::OutOfBounds { .. })
    ));
}
