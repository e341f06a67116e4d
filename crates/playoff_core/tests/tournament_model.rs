use playoff_core::{Tournament, TournamentStatus};
use uuid::Uuid;

#[test]
fn new_tournament_sets_defaults() {
    let creator = Uuid::new_v4();
    let tournament = Tournament::new("city open", creator);

    assert!(!tournament.id.is_nil());
    assert_eq!(tournament.name, "city open");
    assert_eq!(tournament.status, TournamentStatus::Registration);
    assert!(tournament.is_active);
    assert_eq!(tournament.creator_id, creator);
    assert!(tournament.participant_ids.is_empty());
    assert!(!tournament.is_finished());
}

#[test]
fn finished_classification_covers_both_flags() {
    let mut tournament = Tournament::new("club night", Uuid::new_v4());
    assert!(!tournament.is_finished());

    tournament.status = TournamentStatus::Finished;
    assert!(tournament.is_finished());

    tournament.status = TournamentStatus::Ongoing;
    assert!(!tournament.is_finished());

    tournament.is_active = false;
    assert!(tournament.is_finished());
}

#[test]
fn involvement_covers_creator_and_participants() {
    let creator = Uuid::new_v4();
    let player = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let mut tournament = Tournament::new("doubles cup", creator);
    tournament.participant_ids.push(player);

    assert!(tournament.involves(&creator));
    assert!(tournament.involves(&player));
    assert!(!tournament.involves(&stranger));
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let creator = Uuid::parse_str("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").unwrap();
    let player = Uuid::parse_str("99999999-8888-4777-8666-555555555555").unwrap();
    let tournament = Tournament {
        id,
        name: "autumn masters".to_string(),
        city: Some("Riga".to_string()),
        starts_at_ms: 1_700_000_000_000,
        status: TournamentStatus::Ongoing,
        is_active: true,
        creator_id: creator,
        participant_ids: vec![player],
        max_participants: Some(32),
        created_at_ms: 1_699_000_000_000,
        updated_at_ms: 1_699_500_000_000,
    };

    let json = serde_json::to_value(&tournament).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["name"], "autumn masters");
    assert_eq!(json["city"], "Riga");
    assert_eq!(json["startsAtMs"], 1_700_000_000_000_i64);
    assert_eq!(json["status"], "ONGOING");
    assert_eq!(json["isActive"], true);
    assert_eq!(json["creatorId"], creator.to_string());
    assert_eq!(json["participantIds"][0], player.to_string());
    assert_eq!(json["maxParticipants"], 32);
    assert_eq!(json["createdAtMs"], 1_699_000_000_000_i64);
    assert_eq!(json["updatedAtMs"], 1_699_500_000_000_i64);

    let decoded: Tournament = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, tournament);
}
