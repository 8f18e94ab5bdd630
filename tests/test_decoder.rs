
use fixtures::*;

use billing_xml::{
    Decode, Decoder, DecoderSettings, DecodingError, KeyedContainer, Result, XmlDocument, XmlTag,
    decode, decode_with_settings,
};
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq)]
struct Charge {
    amount: i64,
    description: Option<String>,
}

impl XmlTag for Charge {
    const TAG: &'static str = "charge";
}

impl Decode for Charge {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        Ok(Charge {
            amount: keyed.decode_i64("amount")?,
            description: keyed.decode_if_present("description", KeyedContainer::decode_string)?,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Statement {
    number: u32,
    charges: Vec<Charge>,
}

impl Decode for Statement {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        Ok(Statement {
            number: keyed.decode_scalar("number")?,
            charges: keyed.decode("charges")?,
        })
    }
}

#[test]
fn test_sequence_decodes_matching_elements_then_stops_at_mismatch() {
    ensure_env_logger_initialized();
    let settings = DecoderSettings::new();
    let doc = XmlDocument::parse(
        b"<charges>\
            <charge><amount>1</amount></charge>\
            <charge><amount>2</amount></charge>\
            <charge><amount>3</amount></charge>\
            <refund><amount>4</amount></refund>\
          </charges>",
        &settings,
    )
    .unwrap();

    let mut sequence = Decoder::new(doc.root(), &settings).unkeyed();
    assert_eq!(sequence.count(), 4);

    let amounts: Vec<i64> = (0..3)
        .map(|_| sequence.decode::<Charge>().unwrap().amount)
        .collect();
    assert_eq!(amounts, vec![1, 2, 3]);
    assert_eq!(sequence.current_index(), 3);

    match sequence.decode::<Charge>().unwrap_err() {
        DecodingError::TagMismatch { expected, actual } => {
            assert_eq!(expected, "charge");
            assert_eq!(actual, "refund");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(sequence.current_index(), 3);
    assert!(!sequence.is_at_end());
}

#[test]
fn test_nested_records_and_lists() {
    ensure_env_logger_initialized();
    let statement: Statement = decode(
        br#"<statement>
  <charges type="array">
    <charge><amount>1500</amount><description>Monthly</description></charge>
    <charge><amount>-200</amount><description nil="nil"></description></charge>
  </charges>
  <number type="integer">12</number>
</statement>"#,
    )
    .unwrap();

    assert_eq!(
        statement,
        Statement {
            number: 12,
            charges: vec![
                Charge {
                    amount: 1500,
                    description: Some("Monthly".to_owned()),
                },
                Charge {
                    amount: -200,
                    description: None,
                },
            ],
        }
    );
}

#[test]
fn test_error_carries_coding_path() {
    ensure_env_logger_initialized();
    let err = decode::<Statement>(
        b"<statement><number>1</number><charges>\
            <charge><amount>1</amount></charge>\
            <charge><amount>ten</amount></charge>\
          </charges></statement>",
    )
    .unwrap_err();

    assert_eq!(err.coding_path(), "charges[1]");
    match err.root_cause() {
        DecodingError::TypeMismatch {
            key,
            expected,
            found,
        } => {
            assert_eq!(key, "amount");
            assert_eq!(*expected, "a `i64`");
            assert_eq!(found, "ten");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_text_between_list_elements_is_a_tag_mismatch_when_preserved() {
    ensure_env_logger_initialized();
    let xml = b"<statement><number>1</number><charges>\n  <charge><amount>1</amount></charge>\n</charges></statement>";

    let statement: Statement = decode(xml).unwrap();
    assert_eq!(statement.charges.len(), 1);

    let settings = DecoderSettings::new().preserve_whitespace(true);
    let err = decode_with_settings::<Statement>(xml, &settings).unwrap_err();
    match err.root_cause() {
        DecodingError::TagMismatch { actual, .. } => assert_eq!(actual, "#text"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_root_level_failures() {
    ensure_env_logger_initialized();
    assert!(matches!(
        decode::<Statement>(b""),
        Err(DecodingError::MalformedDocument { .. })
    ));
    assert!(matches!(
        decode::<Statement>(b"<statement><number>1</number></statement>"),
        Err(DecodingError::MissingField { key, .. }) if key == "charges"
    ));
}
