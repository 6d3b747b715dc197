use shape_core::{Measurement, SphereVolumeRule};
use shape_tally::{ErrorCategory, StreamError, Tally, TallyConfig, UnknownKindPolicy};

fn tally_csv(input: &str, config: TallyConfig) -> Result<Vec<Tally>, StreamError> {
    let records = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').collect::<Vec<_>>());
    shape_tally::run(records, config)
}

fn assert_totals(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "expected {e}, got {a}");
    }
}

#[test]
fn mixed_batches_are_tallied_independently() {
    let input = "\
triangle,3,4,5
cube,2
area,1
cylinder,1,1
prism,2,4,3
volume,2
area,5
";
    let tallies = tally_csv(input, TallyConfig::default()).expect("stream should succeed");
    assert_eq!(tallies.len(), 3);

    assert_eq!(tallies[0].measurement, Measurement::Area);
    assert_totals(&tallies[0].totals, &[6.0, 30.0]);

    assert_eq!(tallies[1].measurement, Measurement::Volume);
    let pi = std::f64::consts::PI;
    assert_totals(&tallies[1].totals, &[2.0 * pi, 2.0 * pi + 24.0]);

    assert!(tallies[2].totals.is_empty());
}

#[test]
fn unknown_lines_pass_through_by_default() {
    let input = "# shapes\ncube,1\nhexagon,2\narea,1\n";
    let tallies = tally_csv(input, TallyConfig::default()).expect("unknown kinds are ignored");
    assert_totals(&tallies[0].totals, &[6.0]);

    let strict = TallyConfig::new(UnknownKindPolicy::Reject, SphereVolumeRule::Exact);
    let err = tally_csv(input, strict).expect_err("unknown kinds are rejected");
    assert_eq!(err.category(), ErrorCategory::UnknownKind);
}

#[test]
fn first_error_stops_the_stream() {
    let input = "cube,1\ncube,-1\narea,1\n";
    let err = tally_csv(input, TallyConfig::default()).expect_err("negative length");
    assert_eq!(err.category(), ErrorCategory::InvalidDimension);
    assert_eq!(err.record, 2);

    let err = tally_csv("cube,1,2\n", TallyConfig::default()).expect_err("extra field");
    assert_eq!(err.category(), ErrorCategory::MalformedRecord);

    let err = tally_csv("cube,1\nvolume,1\n", TallyConfig::default()).expect_err("cube volume");
    assert_eq!(err.category(), ErrorCategory::UnsupportedOperation);
}

#[test]
fn legacy_sphere_volume_is_opt_in() {
    let input = "sphere,1\nvolume,1\n";
    let pi = std::f64::consts::PI;

    let exact = tally_csv(input, TallyConfig::default()).expect("exact");
    assert_totals(&exact[0].totals, &[4.0 / 3.0 * pi]);

    let legacy = TallyConfig::new(UnknownKindPolicy::Ignore, SphereVolumeRule::LegacyTruncated);
    let truncated = tally_csv(input, legacy).expect("legacy");
    assert_totals(&truncated[0].totals, &[pi]);
}

#[test]
fn tally_serializes_as_json_object() {
    let tallies = tally_csv("cube,2\narea,0.5\n", TallyConfig::default()).expect("tally");
    let json = serde_json::to_value(&tallies[0]).expect("serializable");
    assert_eq!(
        json,
        serde_json::json!({
            "measurement": "area",
            "multiplier": 0.5,
            "totals": [12.0],
        })
    );
}
