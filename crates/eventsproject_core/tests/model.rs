use chrono::NaiveDate;
use eventsproject_core::{Event, Logistics, Participant, Role};
use uuid::Uuid;

#[test]
fn event_new_starts_with_empty_sets_and_zero_cost() {
    let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let event = Event::new("Tech Day", start, start);

    assert!(!event.id.is_nil());
    assert_eq!(event.cost, 0.0);
    assert!(event.logistics.is_empty());
    assert!(event.participants.is_empty());
}

#[test]
fn participant_links_are_idempotent() {
    let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let mut event = Event::new("Tech Day", start, start);
    let id = Uuid::new_v4();

    assert!(event.add_participant(id));
    assert!(!event.add_participant(id));
    assert_eq!(event.participants, vec![id]);
}

#[test]
fn participant_serialization_uses_role_wire_names() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let participant = Participant::with_id(id, "Tounsi", "Ahmed").with_role(Role::Organizer);

    let json = serde_json::to_value(&participant).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["last_name"], "Tounsi");
    assert_eq!(json["role"], "ORGANISATEUR");

    let decoded: Participant = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, participant);
}

#[test]
fn event_serialization_embeds_logistics_and_iso_dates() {
    let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
    let mut event = Event::new("Tech Day", start, end);
    event.add_logistics(Logistics::new("Projector", 100.0, 2).reserved(true));

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["start_date"], "2024-05-01");
    assert_eq!(json["end_date"], "2024-05-03");
    assert_eq!(json["logistics"][0]["reserved"], true);
    assert_eq!(json["logistics"][0]["quantity"], 2);
}

#[test]
fn unknown_role_is_rejected_on_decode() {
    let json = serde_json::json!({
        "id": Uuid::new_v4().to_string(),
        "last_name": "Tounsi",
        "first_name": "Ahmed",
        "role": "SERVEUR",
    });
    assert!(serde_json::from_value::<Participant>(json).is_err());
}
