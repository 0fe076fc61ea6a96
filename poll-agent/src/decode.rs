//! Untyped Candid replies to [`RawPoll`] and friends.
//!
//! Replies are decoded without a type table on our side, so record labels
//! arrive as hashes and numbers in whatever width the canister declared.

use candid::types::value::{IDLField, IDLValue};
use candid::IDLArgs;
use poll_core::{RawPoll, ServiceError, VoteOutcome, VotesWire};

/// Candid field-name hash.
pub fn field_hash(name: &str) -> u32 {
    name.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(223).wrapping_add(u32::from(b)))
}

fn field<'a>(fields: &'a [IDLField], name: &str) -> Option<&'a IDLValue> {
    let id = field_hash(name);
    fields.iter().find(|f| f.id.get_id() == id).map(|f| &f.val)
}

fn kind(value: &IDLValue) -> String {
    value.value_ty().to_string()
}

/// Any non-negative integer representation that fits in `u64`.
pub fn as_u64(value: &IDLValue) -> Option<u64> {
    match value {
        IDLValue::Nat64(n) => Some(*n),
        IDLValue::Nat32(n) => Some(u64::from(*n)),
        IDLValue::Nat16(n) => Some(u64::from(*n)),
        IDLValue::Nat8(n) => Some(u64::from(*n)),
        IDLValue::Nat(n) => u64::try_from(&n.0).ok(),
        IDLValue::Int(n) => u64::try_from(&n.0).ok(),
        IDLValue::Int64(n) => u64::try_from(*n).ok(),
        IDLValue::Int32(n) => u64::try_from(*n).ok(),
        IDLValue::Number(s) => s.parse().ok(),
        _ => None,
    }
}

fn as_text(value: &IDLValue) -> Option<String> {
    match value {
        IDLValue::Text(s) => Some(s.clone()),
        IDLValue::Principal(p) => Some(p.to_text()),
        _ => None,
    }
}

pub fn votes_wire(value: Option<&IDLValue>) -> VotesWire {
    match value {
        None | Some(IDLValue::Null) | Some(IDLValue::None) => VotesWire::Missing,
        Some(IDLValue::Vec(items)) => match items.iter().find(|v| as_u64(v).is_none()) {
            None => VotesWire::Sequence(items.iter().filter_map(as_u64).collect()),
            Some(bad) => VotesWire::Unrecognized {
                kind: format!("vec containing {}", kind(bad)),
            },
        },
        Some(IDLValue::Blob(bytes)) => VotesWire::Packed(bytes.clone()),
        Some(other) => VotesWire::Unrecognized { kind: kind(other) },
    }
}

fn voters(value: Option<&IDLValue>) -> Option<Vec<String>> {
    let IDLValue::Vec(items) = value? else {
        return None;
    };
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                IDLValue::Record(fields) => fields.first().and_then(|f| as_text(&f.val)),
                other => as_text(other),
            })
            .collect(),
    )
}

fn options(value: Option<&IDLValue>) -> Option<Vec<String>> {
    let IDLValue::Vec(items) = value? else {
        return None;
    };
    items.iter().map(as_text).collect()
}

pub fn raw_poll(value: &IDLValue) -> Result<RawPoll, ServiceError> {
    let IDLValue::Record(fields) = value else {
        return Err(ServiceError::Malformed(format!(
            "expected poll record, got {}",
            kind(value)
        )));
    };
    let id = field(fields, "id")
        .and_then(as_u64)
        .ok_or_else(|| ServiceError::Malformed("poll record without a usable id".into()))?;

    Ok(RawPoll {
        id,
        question: field(fields, "question").and_then(as_text),
        options: options(field(fields, "options")),
        votes: votes_wire(field(fields, "votes")),
        voters: voters(field(fields, "voters")),
    })
}

fn first_arg(bytes: &[u8]) -> Result<IDLValue, ServiceError> {
    let args = IDLArgs::from_bytes(bytes).map_err(|e| ServiceError::Malformed(e.to_string()))?;
    args.args
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Malformed("empty reply".into()))
}

pub fn decode_poll_id(bytes: &[u8]) -> Result<u64, ServiceError> {
    let value = first_arg(bytes)?;
    as_u64(&value).ok_or_else(|| {
        ServiceError::Malformed(format!("expected a poll id, got {}", kind(&value)))
    })
}

pub fn decode_polls(bytes: &[u8]) -> Result<Vec<RawPoll>, ServiceError> {
    match first_arg(bytes)? {
        IDLValue::Vec(items) => items.iter().map(raw_poll).collect(),
        other => Err(ServiceError::Malformed(format!(
            "expected vec of polls, got {}",
            kind(&other)
        ))),
    }
}

pub fn decode_optional_poll(bytes: &[u8]) -> Result<Option<RawPoll>, ServiceError> {
    match first_arg(bytes)? {
        IDLValue::None | IDLValue::Null => Ok(None),
        IDLValue::Opt(inner) => raw_poll(&inner).map(Some),
        record @ IDLValue::Record(_) => raw_poll(&record).map(Some),
        other => Err(ServiceError::Malformed(format!(
            "expected opt poll, got {}",
            kind(&other)
        ))),
    }
}

pub fn decode_vote_outcome(bytes: &[u8]) -> Result<VoteOutcome, ServiceError> {
    let value = first_arg(bytes)?;
    let IDLValue::Variant(variant) = &value else {
        return Err(ServiceError::Malformed(format!(
            "expected vote result variant, got {}",
            kind(&value)
        )));
    };
    let tag = &variant.0;
    match tag.id.get_id() {
        id if id == field_hash("Ok") => Ok(VoteOutcome::Ok),
        id if id == field_hash("Err") => Ok(VoteOutcome::Err(
            as_text(&tag.val).unwrap_or_else(|| kind(&tag.val)),
        )),
        other => Err(ServiceError::Malformed(format!(
            "unknown vote result tag {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candid::types::Label;
    use candid::{CandidType, Encode, Nat};

    #[derive(CandidType)]
    struct WirePoll {
        id: u64,
        question: String,
        options: Vec<String>,
        votes: Vec<u64>,
        voters: Vec<(String, u64)>,
    }

    fn named(name: &str, val: IDLValue) -> IDLField {
        IDLField {
            id: Label::Named(name.into()),
            val,
        }
    }

    #[test]
    fn hash_matches_candid_labels() {
        assert_eq!(field_hash("id"), Label::Named("id".into()).get_id());
        assert_eq!(field_hash("votes"), Label::Named("votes".into()).get_id());
    }

    #[test]
    fn decodes_typed_reply() {
        let bytes = Encode!(&vec![WirePoll {
            id: 0,
            question: "Pick a color".into(),
            options: vec!["Red".into(), "Blue".into()],
            votes: vec![0, 1],
            voters: vec![("2vxsx-fae".into(), 1)],
        }])
        .unwrap();

        let polls = decode_polls(&bytes).unwrap();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].id, 0);
        assert_eq!(polls[0].question.as_deref(), Some("Pick a color"));
        assert_eq!(polls[0].options, Some(vec!["Red".to_string(), "Blue".to_string()]));
        assert_eq!(polls[0].votes, VotesWire::Sequence(vec![0, 1]));
        assert_eq!(polls[0].voters, Some(vec!["2vxsx-fae".to_string()]));
    }

    #[test]
    fn wide_and_narrow_ids_are_accepted() {
        assert_eq!(as_u64(&IDLValue::Nat(Nat::from(u64::MAX))), Some(u64::MAX));
        assert_eq!(as_u64(&IDLValue::Nat32(7)), Some(7));
        assert_eq!(as_u64(&IDLValue::Int64(-1)), None);
        let too_big = Nat::from(u128::from(u64::MAX) + 1);
        assert_eq!(as_u64(&IDLValue::Nat(too_big)), None);
    }

    #[test]
    fn tally_shapes() {
        assert_eq!(votes_wire(None), VotesWire::Missing);
        assert_eq!(
            votes_wire(Some(&IDLValue::Vec(vec![IDLValue::Nat(Nat::from(3u64)), IDLValue::Nat64(4)]))),
            VotesWire::Sequence(vec![3, 4])
        );
        assert_eq!(
            votes_wire(Some(&IDLValue::Blob(vec![1, 0, 0, 0, 0, 0, 0, 0]))),
            VotesWire::Packed(vec![1, 0, 0, 0, 0, 0, 0, 0])
        );
        assert!(matches!(
            votes_wire(Some(&IDLValue::Text("3,4".into()))),
            VotesWire::Unrecognized { .. }
        ));
        assert!(matches!(
            votes_wire(Some(&IDLValue::Vec(vec![IDLValue::Text("x".into())]))),
            VotesWire::Unrecognized { .. }
        ));
    }

    #[test]
    fn record_without_optional_fields() {
        let record = IDLValue::Record(vec![named("id", IDLValue::Nat64(12))]);
        let raw = raw_poll(&record).unwrap();
        assert_eq!(raw, RawPoll::new(12));
    }

    #[test]
    fn record_without_id_is_malformed() {
        let record = IDLValue::Record(vec![named("question", IDLValue::Text("q".into()))]);
        assert!(matches!(raw_poll(&record), Err(ServiceError::Malformed(_))));
    }

    #[test]
    fn optional_poll_and_id_replies() {
        assert_eq!(decode_optional_poll(&Encode!(&None::<u64>).unwrap()).unwrap(), None);
        assert_eq!(decode_poll_id(&Encode!(&42u64).unwrap()).unwrap(), 42);
        assert!(decode_poll_id(&Encode!(&"nope").unwrap()).is_err());
    }

    #[test]
    fn vote_result_tags() {
        let ok: Result<(), String> = Ok(());
        let err: Result<(), String> = Err("Already voted".into());
        assert_eq!(decode_vote_outcome(&Encode!(&ok).unwrap()).unwrap(), VoteOutcome::Ok);
        assert_eq!(
            decode_vote_outcome(&Encode!(&err).unwrap()).unwrap(),
            VoteOutcome::Err("Already voted".into())
        );
        assert!(decode_vote_outcome(&Encode!(&1u8).unwrap()).is_err());
    }
}
