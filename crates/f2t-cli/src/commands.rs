//! Reference payload builders for the standard commands.
//!
//! These are glue, not protocol truth: each builder gives the mutation
//! engine one well-formed example of the command with realistic values,
//! plus the nested-shape targets worth sweeping.

use ciborium::value::Value;
use f2t_core::Command;
use f2t_mutator::ReferencePayload;
use f2t_runner::{CommandUnderTest, InnerMapTarget};

const EXAMPLE_RP_ID: &str = "example.com";
const EXAMPLE_CREDENTIAL_ID: [u8; 16] = [0x1D; 16];

fn credential_descriptor() -> Value {
    Value::Map(vec![
        (
            Value::Text("type".to_owned()),
            Value::Text("public-key".to_owned()),
        ),
        (
            Value::Text("id".to_owned()),
            Value::Bytes(EXAMPLE_CREDENTIAL_ID.to_vec()),
        ),
    ])
}

fn rp_entity() -> Vec<(Value, Value)> {
    vec![
        (
            Value::Text("id".to_owned()),
            Value::Text(EXAMPLE_RP_ID.to_owned()),
        ),
        (
            Value::Text("name".to_owned()),
            Value::Text("Example".to_owned()),
        ),
    ]
}

fn user_entity() -> Vec<(Value, Value)> {
    vec![
        (Value::Text("id".to_owned()), Value::Bytes(vec![0x1E; 8])),
        (
            Value::Text("name".to_owned()),
            Value::Text("user@example.com".to_owned()),
        ),
    ]
}

fn options_map() -> Vec<(Value, Value)> {
    vec![(Value::Text("rk".to_owned()), Value::Bool(true))]
}

/// authenticatorMakeCredential with every sweepable nested shape.
pub fn make_credential() -> CommandUnderTest {
    let reference = ReferencePayload::new()
        .required(1, "clientDataHash", Value::Bytes(vec![0xC1; 32]))
        .required(2, "rp", Value::Map(rp_entity()))
        .required(3, "user", Value::Map(user_entity()))
        .required(
            4,
            "pubKeyCredParams",
            Value::Array(vec![Value::Map(vec![
                (
                    Value::Text("type".to_owned()),
                    Value::Text("public-key".to_owned()),
                ),
                (Value::Text("alg".to_owned()), Value::Integer((-7).into())),
            ])]),
        )
        .optional(5, "excludeList", Value::Array(vec![credential_descriptor()]))
        .optional(7, "options", Value::Map(options_map()));
    let mut cut = CommandUnderTest::new(Command::MakeCredential, reference);
    cut.inner_maps = vec![
        InnerMapTarget {
            outer_key: 2,
            entries: rp_entity(),
            wrap_in_array: false,
        },
        InnerMapTarget {
            outer_key: 3,
            entries: user_entity(),
            wrap_in_array: false,
        },
        InnerMapTarget {
            outer_key: 7,
            entries: options_map(),
            wrap_in_array: false,
        },
    ];
    cut.array_keys = vec![4, 5];
    cut.descriptor_lists = vec![(5, EXAMPLE_CREDENTIAL_ID.to_vec())];
    cut
}

/// authenticatorGetAssertion with allowList sweeps.
pub fn get_assertion() -> CommandUnderTest {
    let reference = ReferencePayload::new()
        .required(1, "rpId", Value::Text(EXAMPLE_RP_ID.to_owned()))
        .required(2, "clientDataHash", Value::Bytes(vec![0xC1; 32]))
        .optional(3, "allowList", Value::Array(vec![credential_descriptor()]))
        .optional(5, "options", Value::Map(options_map()));
    let mut cut = CommandUnderTest::new(Command::GetAssertion, reference);
    cut.inner_maps = vec![InnerMapTarget {
        outer_key: 5,
        entries: options_map(),
        wrap_in_array: false,
    }];
    cut.array_keys = vec![3];
    cut.descriptor_lists = vec![(3, EXAMPLE_CREDENTIAL_ID.to_vec())];
    cut
}

/// authenticatorClientPIN (getPinRetries shape).
pub fn client_pin() -> CommandUnderTest {
    let reference = ReferencePayload::new()
        .required(1, "pinUvAuthProtocol", Value::Integer(1.into()))
        .required(2, "subCommand", Value::Integer(1.into()));
    CommandUnderTest::new(Command::ClientPin, reference)
}

/// All commands the corpus covers, in wire-code order.
pub fn all() -> Vec<CommandUnderTest> {
    vec![make_credential(), get_assertion(), client_pin()]
}
