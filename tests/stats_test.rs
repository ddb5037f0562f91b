use topgender::{
    management::{Phase, Snapshot},
    stats::*,
    types::{Artist, Gender, GenderFilter, TimeRange},
    view,
};

// Helper function to create a test artist
fn create_test_artist(id: &str, name: &str, gender: Gender) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        images: Vec::new(),
        genres: vec!["indie".to_string(), "pop".to_string(), "rock".to_string()],
        external_url: format!("https://open.spotify.com/artist/{}", id),
        gender,
        popularity: 70,
        followers: 12_345,
    }
}

fn lineup(male: usize, female: usize, unknown: usize) -> Vec<Artist> {
    let mut artists = Vec::new();
    for (gender, n) in [
        (Gender::Male, male),
        (Gender::Female, female),
        (Gender::Unknown, unknown),
    ] {
        for i in 0..n {
            let id = format!("{}{}", gender.label().to_lowercase(), i);
            artists.push(create_test_artist(&id, &format!("{} {}", gender, i), gender));
        }
    }
    artists
}

#[test]
fn test_stats_without_artists_are_all_zero() {
    let stats = GenderStats::from_artists(&[]);

    assert_eq!(stats.total, 0);
    assert_eq!(stats.male_pct, 0.0);
    assert_eq!(stats.female_pct, 0.0);
    assert_eq!(stats.unknown_pct, 0.0);
    assert!(chart_slices(&stats).is_empty());
}

#[test]
fn test_stats_counts_and_percentages() {
    // 3 women, 5 men, 2 unknown
    let stats = GenderStats::from_artists(&lineup(5, 3, 2));

    assert_eq!(stats.total, 10);
    assert_eq!((stats.female, stats.male, stats.unknown), (3, 5, 2));
    assert_eq!(stats.female_pct, 30.0);
    assert_eq!(stats.male_pct, 50.0);
    assert_eq!(stats.unknown_pct, 20.0);
    assert_eq!(stats.male + stats.female + stats.unknown, stats.total);
}

#[test]
fn test_percentage_rounds_to_one_decimal() {
    assert_eq!(percentage(1, 3), 33.3);
    assert_eq!(percentage(2, 3), 66.7);
    assert_eq!(percentage(0, 7), 0.0);
    assert_eq!(percentage(5, 0), 0.0);
}

#[test]
fn test_verdict_bands() {
    let none = verdict(0.0);
    assert_eq!(none, &VERDICTS[0]);
    assert_eq!(none.tone, Tone::Bad);

    assert_eq!(verdict(1.0), &VERDICTS[1]);
    assert_eq!(verdict(45.0).tone, Tone::Good);
    assert_eq!(verdict(50.0).tone, Tone::Excellent);

    let top = verdict(85.0);
    assert_eq!(top, &VERDICTS[VERDICTS.len() - 1]);
    assert_eq!(top.tone, Tone::Excellent);
    assert_eq!(verdict(100.0), top);
}

#[test]
fn test_verdict_bands_are_ascending() {
    for pair in VERDICTS.windows(2) {
        assert!(pair[0].below < pair[1].below);
    }
    assert!(VERDICTS[VERDICTS.len() - 1].below.is_infinite());
}

#[test]
fn test_filter_all_keeps_the_list() {
    let artists = lineup(2, 2, 1);
    assert_eq!(filter_artists(&artists, GenderFilter::All), artists);
}

#[test]
fn test_filter_by_gender_keeps_order() {
    let artists = lineup(2, 3, 1);
    let women = filter_artists(&artists, GenderFilter::Only(Gender::Female));

    assert_eq!(women.len(), 3);
    assert!(women.iter().all(|a| a.gender == Gender::Female));
    let ids: Vec<&str> = women.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["female0", "female1", "female2"]);

    let stats = GenderStats::from_artists(&artists);
    assert_eq!(stats.count_for(GenderFilter::Only(Gender::Female)), 3);
    assert_eq!(stats.count_for(GenderFilter::All), 6);
}

#[test]
fn test_chart_slices_skip_empty_categories() {
    let stats = GenderStats::from_artists(&lineup(3, 0, 1));
    let slices = chart_slices(&stats);

    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].gender, Gender::Male);
    assert_eq!(slices[0].value, 3);
    assert_eq!(slices[0].share, 75);
    assert_eq!(slices[1].gender, Gender::Unknown);
    assert_eq!(slices[1].share, 25);
}

#[test]
fn test_dashboard_shows_cards_verdict_and_artists() {
    colored::control::set_override(false);
    let artists = lineup(1, 1, 0);

    let out = view::dashboard(
        TimeRange::MediumTerm,
        &artists,
        GenderFilter::All,
        &[TimeRange::ShortTerm, TimeRange::MediumTerm],
    );

    assert!(out.contains("Top artists, last 6 months"));
    assert!(out.contains("Total artists"));
    assert!(out.contains("50.0%"));
    assert!(out.contains(VERDICTS[5].message));
    assert!(out.contains("Male 0"));
    assert!(out.contains("Female 0"));
    assert!(out.contains("[All (2)]"));
    assert!(out.contains("indie, pop"));
    assert!(!out.contains("indie, pop, rock"));
    assert!(out.contains("12.3K"));
}

#[test]
fn test_dashboard_reports_empty_filter() {
    colored::control::set_override(false);
    let artists = lineup(2, 0, 0);

    let out = view::dashboard(
        TimeRange::ShortTerm,
        &artists,
        GenderFilter::Only(Gender::Female),
        &[TimeRange::ShortTerm],
    );

    assert!(out.contains("[Female (0)]"));
    assert!(out.contains("No artists match this filter."));
}

#[test]
fn test_snapshot_views() {
    colored::control::set_override(false);

    let logged_out = Snapshot {
        phase: Phase::LoggedOut {
            notice: Some("Authentication error: access_denied".to_string()),
        },
        selected: TimeRange::ShortTerm,
        artists: Vec::new(),
        cached: Vec::new(),
    };
    let out = view::snapshot(&logged_out, GenderFilter::All);
    assert!(out.contains("Authentication error: access_denied"));
    assert!(out.contains("topgender login"));

    let failed = Snapshot {
        phase: Phase::Failed {
            range: TimeRange::LongTerm,
            message: "Could not load your artists. Please try again.".to_string(),
        },
        selected: TimeRange::LongTerm,
        artists: Vec::new(),
        cached: vec![TimeRange::ShortTerm],
    };
    let out = view::snapshot(&failed, GenderFilter::All);
    assert!(out.contains("Could not load your artists."));
    assert!(out.contains("Press 3 to try again."));

    let loading = Snapshot {
        phase: Phase::Loading(TimeRange::ShortTerm),
        ..failed
    };
    assert_eq!(
        view::snapshot(&loading, GenderFilter::All),
        view::loading(TimeRange::ShortTerm)
    );
}
