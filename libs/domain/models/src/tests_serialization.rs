// [libs/domain/models/src/tests_serialization.rs]
//! Roundtrip de serializacion para los contratos de alambre compartidos
//! entre coordinador y agente.

#[cfg(test)]
mod tests {
    use crate::events::RealTimeEvent;
    use crate::subjob::{SubJob, SubJobStatus, SubJobUpdate};
    use crate::wire::WordlistPayload;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_subjob() -> SubJob {
        SubJob {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            batch_id: Uuid::new_v4(),
            name: "ntlm-dump (gpu1)".to_string(),
            hash_type: 1000,
            attack_mode: 0,
            hash_file_id: Uuid::new_v4(),
            wordlist_id: Uuid::new_v4(),
            rules: None,
            agent_id: Uuid::new_v4(),
            skip: 1,
            limit: 4,
            status: SubJobStatus::Running,
            progress: 37,
            speed: 12_000,
            eta: Some("2 hrs 5 mins".to_string()),
            result: None,
            created_at: Utc::now(),
            started_at: Some(Utc::now()),
            completed_at: None,
        }
    }

    #[test]
    fn subjob_roundtrips_through_json() {
        let original = sample_subjob();
        let json = serde_json::to_string(&original).expect("serialize sub-job");
        let decoded: SubJob = serde_json::from_str(&json).expect("deserialize sub-job");
        assert_eq!(decoded.id, original.id);
        assert_eq!(decoded.window(), original.window());
        assert_eq!(decoded.eta, original.eta);
    }

    #[test]
    fn subjob_window_is_half_open() {
        let sj = sample_subjob();
        assert!(sj.contains_offset(1));
        assert!(sj.contains_offset(4));
        assert!(!sj.contains_offset(5));
    }

    #[test]
    fn subjob_update_ignores_unknown_fields() {
        let payload = serde_json::json!({
            "progress": 50,
            "speed": 900,
            "unexpected_field": "whatever the agent adds next release",
        });
        let update: SubJobUpdate =
            serde_json::from_value(payload).expect("unknown fields must be ignored");
        assert_eq!(update.progress, 50);
        assert_eq!(update.speed, 900);
        assert_eq!(update.eta, None);
    }

    #[test]
    fn event_tag_roundtrips() {
        let event = RealTimeEvent::AgentSpeed {
            agent_id: Uuid::new_v4(),
            speed: 42,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "agent_speed");
        let decoded: RealTimeEvent = serde_json::from_value(json).unwrap();
        match decoded {
            RealTimeEvent::AgentSpeed { speed, .. } => assert_eq!(speed, 42),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn wordlist_payload_variants_roundtrip() {
        let materialized = WordlistPayload::Materialized {
            wordlist_id: Uuid::new_v4(),
        };
        let inline = WordlistPayload::Inline {
            words: vec!["admin".to_string(), "password".to_string()],
        };
        for payload in [materialized, inline] {
            let json = serde_json::to_string(&payload).unwrap();
            let decoded: WordlistPayload = serde_json::from_str(&json).unwrap();
            assert_eq!(
                serde_json::to_string(&decoded).unwrap(),
                json,
                "payload must roundtrip byte-stable"
            );
        }
    }
}
