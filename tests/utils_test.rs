use std::collections::HashMap;

use topgender::cli::{Action, parse_action};
use topgender::management::FailurePolicy;
use topgender::session::{CallbackOutcome, Session, has_transient_params};
use topgender::types::{Artist, Gender, GenderFilter, TimeRange, TopArtistsResponse};
use topgender::utils::*;

fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_parse_time_range() {
    assert_eq!(parse_time_range("short_term"), Ok(TimeRange::ShortTerm));
    assert_eq!(parse_time_range("medium-term"), Ok(TimeRange::MediumTerm));
    assert_eq!(parse_time_range(" LONG_TERM "), Ok(TimeRange::LongTerm));
    assert_eq!(parse_time_range("2"), Ok(TimeRange::MediumTerm));
    assert_eq!(parse_time_range("1y"), Ok(TimeRange::LongTerm));

    assert!(parse_time_range("").is_err());
    assert!(parse_time_range("forever").is_err());
}

#[test]
fn test_time_range_wire_values() {
    for range in TimeRange::ALL {
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, format!("\"{}\"", range.as_str()));
        assert_eq!(range.to_string().parse::<TimeRange>(), Ok(range));
    }
    assert_eq!(TimeRange::default(), TimeRange::ShortTerm);
    assert_eq!(
        TimeRange::MediumTerm.others(),
        vec![TimeRange::ShortTerm, TimeRange::LongTerm]
    );
}

#[test]
fn test_parse_gender_filter() {
    assert_eq!(parse_gender_filter("all"), Ok(GenderFilter::All));
    assert_eq!(
        parse_gender_filter("Female"),
        Ok(GenderFilter::Only(Gender::Female))
    );
    assert_eq!(parse_gender_filter("m"), Ok(GenderFilter::Only(Gender::Male)));
    assert_eq!(
        parse_gender_filter("unknown"),
        Ok(GenderFilter::Only(Gender::Unknown))
    );

    assert!(parse_gender_filter("").is_err());
    assert!(parse_gender_filter("nonbinary").is_err());
}

#[test]
fn test_failure_policy_parsing() {
    assert_eq!("keep_session".parse::<FailurePolicy>(), Ok(FailurePolicy::KeepSession));
    assert_eq!("CLEAR".parse::<FailurePolicy>(), Ok(FailurePolicy::ClearSession));
    assert!("drop".parse::<FailurePolicy>().is_err());
    assert_eq!(FailurePolicy::default(), FailurePolicy::KeepSession);
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(33.333, 1), 33.3);
    assert_eq!(round_to(66.666, 1), 66.7);
    assert_eq!(round_to(12.0, 1), 12.0);
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("Björk", 10), "Björk");
    assert_eq!(truncate("Florence + The Machine", 10), "Florence …");
    assert_eq!(truncate("Florence + The Machine", 10).chars().count(), 10);
}

#[test]
fn test_human_count() {
    assert_eq!(human_count(950), "950");
    assert_eq!(human_count(12_345), "12.3K");
    assert_eq!(human_count(4_100_000), "4.1M");
    assert_eq!(human_count(1_000), "1.0K");
    assert_eq!(human_count(999_949), "999.9K");
    assert_eq!(human_count(999_950), "1.0M");
}

#[test]
fn test_callback_with_session() {
    let outcome = CallbackOutcome::from_query(&query(&[("session_id", "abc123")]));
    assert_eq!(outcome, CallbackOutcome::Session(Session::new("abc123")));
}

#[test]
fn test_callback_error_wins_over_session() {
    let outcome = CallbackOutcome::from_query(&query(&[
        ("session_id", "abc123"),
        ("error", "access_denied"),
    ]));
    assert_eq!(
        outcome,
        CallbackOutcome::AuthError("access_denied".to_string())
    );
}

#[test]
fn test_callback_ignores_empty_values() {
    let outcome =
        CallbackOutcome::from_query(&query(&[("session_id", "abc123"), ("error", " ")]));
    assert_eq!(outcome, CallbackOutcome::Session(Session::new("abc123")));

    let outcome = CallbackOutcome::from_query(&query(&[("session_id", "")]));
    assert!(outcome.is_empty());

    assert!(CallbackOutcome::from_query(&query(&[])).is_empty());
}

#[test]
fn test_transient_params() {
    assert!(has_transient_params(&query(&[("session_id", "")])));
    assert!(has_transient_params(&query(&[("error", "x")])));
    assert!(!has_transient_params(&query(&[("state", "x")])));
}

#[test]
fn test_session_debug_hides_token() {
    let session = Session::new("supersecrettoken");
    let debug = format!("{:?}", session);
    assert!(!debug.contains("supersecrettoken"));
    assert_eq!(session.id(), "supersecrettoken");
}

#[test]
fn test_parse_action() {
    assert_eq!(parse_action("1"), Ok(Action::Select(TimeRange::ShortTerm)));
    assert_eq!(
        parse_action("long_term"),
        Ok(Action::Select(TimeRange::LongTerm))
    );
    assert_eq!(
        parse_action("f female"),
        Ok(Action::Filter(GenderFilter::Only(Gender::Female)))
    );
    assert_eq!(parse_action("filter all"), Ok(Action::Filter(GenderFilter::All)));
    assert_eq!(parse_action(""), Ok(Action::Redraw));
    assert_eq!(parse_action("q"), Ok(Action::Quit));
    assert_eq!(parse_action("logout"), Ok(Action::Logout));
    assert_eq!(parse_action("?"), Ok(Action::Help));

    assert!(parse_action("f").is_err());
    assert!(parse_action("f purple").is_err());
    assert!(parse_action("dance").is_err());
}

#[test]
fn test_artist_decoding_is_lenient() {
    let body = r#"{
        "artists": [
            {"id": "1", "name": "Robyn", "gender": "female", "genres": ["pop"], "popularity": 70},
            {"id": "2", "name": "Mystery", "gender": "nonbinary"},
            {"id": "3", "name": "Nobody Knows"}
        ],
        "total": 3
    }"#;

    let response: TopArtistsResponse = serde_json::from_str(body).unwrap();
    let artists: Vec<Artist> = response.artists;

    assert_eq!(response.total, Some(3));
    assert_eq!(artists[0].gender, Gender::Female);
    assert_eq!(artists[0].genres, vec!["pop".to_string()]);
    assert_eq!(artists[1].gender, Gender::Unknown);
    assert_eq!(artists[2].gender, Gender::Unknown);
    assert!(artists[2].images.is_empty());
    assert_eq!(artists[2].followers, 0);
}
