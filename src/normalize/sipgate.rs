//! Telephony (sipgate) call normalization.

use serde_json::Value;

use crate::clock::now_rfc3339;
use crate::config::SipgateAliases;
use crate::normalize::alias::FieldAlias;
use crate::normalize::envelope::{MappedFields, NormalizedEnvelope, Source};
use crate::normalize::Normalizer;

/// Maps a sipgate call webhook onto `call_data`.
#[derive(Debug, Clone)]
pub struct SipgateNormalizer {
    from: FieldAlias,
    to: FieldAlias,
    direction: FieldAlias,
}

impl SipgateNormalizer {
    pub fn new(aliases: &SipgateAliases) -> Self {
        Self {
            from: FieldAlias::new(aliases.from.clone()),
            to: FieldAlias::new(aliases.to.clone()),
            direction: FieldAlias::with_default(
                aliases.direction.clone(),
                aliases.default_direction.clone(),
            ),
        }
    }
}

impl Default for SipgateNormalizer {
    fn default() -> Self {
        Self::new(&SipgateAliases::default())
    }
}

impl Normalizer for SipgateNormalizer {
    fn source(&self) -> Source {
        Source::Sipgate
    }

    fn normalize(&self, body: &Value) -> NormalizedEnvelope {
        NormalizedEnvelope {
            source: Source::Sipgate,
            fields: MappedFields::Call {
                from: self.from.resolve(body),
                to: self.to.resolve(body),
                direction: self.direction.resolve(body),
            },
            timestamp: now_rfc3339(),
            raw_original: body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call_fields(envelope: &NormalizedEnvelope) -> (Value, Value, Value) {
        match &envelope.fields {
            MappedFields::Call { from, to, direction } => {
                (from.clone(), to.clone(), direction.clone())
            }
            other => panic!("expected call fields, got {:?}", other),
        }
    }

    #[test]
    fn test_primary_keys() {
        let body = json!({"from": "+491234", "to": "+495678"});
        let envelope = SipgateNormalizer::default().normalize(&body);

        assert_eq!(envelope.source, Source::Sipgate);
        assert_eq!(
            call_fields(&envelope),
            (json!("+491234"), json!("+495678"), json!("incoming"))
        );
        assert_eq!(envelope.raw_original, body);
    }

    #[test]
    fn test_secondary_keys() {
        let body = json!({"caller": "+49123", "called": "+49456", "direction": "out"});
        let envelope = SipgateNormalizer::default().normalize(&body);
        assert_eq!(
            call_fields(&envelope),
            (json!("+49123"), json!("+49456"), json!("out"))
        );
    }

    #[test]
    fn test_empty_primary_values_fall_back() {
        let body = json!({"from": "", "caller": "+49123", "to": 0, "called": "+4940", "direction": ""});
        let envelope = SipgateNormalizer::default().normalize(&body);
        assert_eq!(
            call_fields(&envelope),
            (json!("+49123"), json!("+4940"), json!("incoming"))
        );
        assert_eq!(envelope.raw_original, body);
    }

    #[test]
    fn test_missing_fields_degrade_to_unknown() {
        let envelope = SipgateNormalizer::default().normalize(&json!({}));
        assert_eq!(
            call_fields(&envelope),
            (json!("unknown"), json!("unknown"), json!("incoming"))
        );
    }

    #[test]
    fn test_non_object_body_is_preserved() {
        let body = json!(["from", "+49"]);
        let envelope = SipgateNormalizer::default().normalize(&body);
        assert_eq!(call_fields(&envelope).0, json!("unknown"));
        assert_eq!(envelope.raw_original, body);
    }

    #[test]
    fn test_custom_aliases() {
        let aliases = SipgateAliases {
            from: vec!["a_number".into()],
            to: vec!["b_number".into()],
            direction: vec!["dir".into()],
            default_direction: "inbound".into(),
        };
        let body = json!({"a_number": 4930, "from": "ignored", "b_number": "+4940"});
        let envelope = SipgateNormalizer::new(&aliases).normalize(&body);
        assert_eq!(
            call_fields(&envelope),
            (json!(4930), json!("+4940"), json!("inbound"))
        );
    }

    #[test]
    fn test_nested_original_is_untouched() {
        let body = json!({
            "from": "+491",
            "event": {"type": "newCall", "users": ["u1", "u2"], "meta": {"x": null}}
        });
        let envelope = SipgateNormalizer::default().normalize(&body);
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire["call_data"]["original_data"], body);
    }
}
