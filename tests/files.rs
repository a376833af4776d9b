use std::fs;

use plm_analyzer::codecs::timestamp;
use plm_analyzer::local::process_file::write_movement_file;
use plm_analyzer::processing::report::{series_span, NightlyReport};
use plm_analyzer::recording::Recording;
use plm_analyzer::{
    compute_rate, compute_viewport, parse_movement_file, parse_sensor_file,
    serialize_movement_log, EventKind, PlmError,
};

const SENSOR_CSV: &str = "\
Timestamp,ax,ay,az,gx,gy,gz
2020-01-01 00:00:00.000,3,4,0,0.1,0.2,0.3
2020-01-01 00:00:05.000,0,0,5,0.1,0.2,0.3
2020-01-01 00:00:10.000,1,2,2,0.1,0.2,0.3
2020-01-01 00:00:15.000,0,0,1,0.1,0.2,0.3
";

const MOVEMENT_LOG: &str = "StartTimestamp,EventType,Str(g),Duration(s),Interval(s),IsLegDown,RejectionReason\r\n\
2020-01-01 00:00:05.000,P,2.50,1.250,inf ,t,\r\n\
2020-01-01 00:00:10.000,R,0.90,0.500,3.750,f,below threshold\r\n\
2020-01-01 00:00:12.500,P,3.00,0.750,2.000,t,\r\n";

#[test]
fn sensor_file_to_visible_window() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("night.csv");
    fs::write(&path, SENSOR_CSV).unwrap();

    let parsed = parse_sensor_file(&path).unwrap();
    assert!(parsed.is_complete());
    let magnitudes: Vec<f64> = parsed.records.iter().map(|s| s.magnitude).collect();
    assert_eq!(magnitudes, vec![5.0, 5.0, 3.0, 1.0]);

    let viewport = compute_viewport(parsed.records.len(), 2, 3.0);
    assert_eq!((viewport.lower_index, viewport.upper_index), (1, 3));
    let (lower, upper) = viewport.bounds(&parsed.records).unwrap();
    assert_eq!(timestamp::encode(&lower), "2020-01-01 00:00:05.000");
    assert_eq!(timestamp::encode(&upper), "2020-01-01 00:00:15.000");
}

#[test]
fn third_row_failure_keeps_two_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        "2020-01-01 00:00:00.000,3,4,0,0,0,0\n\
         2020-01-01 00:00:05.000,0,0,5,0,0,0\n\
         2020-01-01 0a:00:10.000,1,1,1,0,0,0\n",
    )
    .unwrap();

    let parsed = parse_sensor_file(&path).unwrap();
    assert_eq!(parsed.records.len(), 2);
    let err = parsed.error.clone().unwrap();
    assert_eq!(err.line, 3);
    assert_eq!(
        PlmError::from(err).user_message(),
        "file was of the wrong type or misformatted"
    );

    let mut recording = Recording::default();
    assert!(recording.replace_series(parsed).is_err());
    assert!(recording.series().is_empty());
}

#[test]
fn header_only_file_is_an_empty_input_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "Timestamp,ax,ay,az,gx,gy,gz\n").unwrap();

    let parsed = parse_sensor_file(&path).unwrap();
    assert!(parsed.records.is_empty());
    let warning = parsed.warning(&path).unwrap();
    assert!(warning.is_warning());
}

#[test]
fn movement_log_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("events.txt");
    let copy = dir.path().join("events-copy.txt");
    fs::write(&source, MOVEMENT_LOG).unwrap();

    let parsed = parse_movement_file(&source).unwrap();
    assert!(parsed.is_complete());
    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.records[0].interval, f64::INFINITY);
    assert_eq!(parsed.records[1].kind, EventKind::Rejected);
    assert_eq!(parsed.records[1].rejection_reason, "below threshold");
    assert_eq!(serialize_movement_log(&parsed.records), MOVEMENT_LOG);

    write_movement_file(&copy, &parsed.records).unwrap();
    assert_eq!(fs::read_to_string(&copy).unwrap(), MOVEMENT_LOG);
    assert_eq!(parse_movement_file(&copy).unwrap(), parsed);
}

#[test]
fn rate_and_report_over_the_recording() {
    let dir = tempfile::tempdir().unwrap();
    let sensor = dir.path().join("night.csv");
    let log = dir.path().join("events.txt");
    fs::write(&sensor, SENSOR_CSV).unwrap();
    fs::write(&log, MOVEMENT_LOG).unwrap();

    let series = parse_sensor_file(&sensor).unwrap().records;
    let events = parse_movement_file(&log).unwrap().records;
    let (start, end) = series_span(&series).unwrap();

    // 15 s window, 2 PLM events strictly inside
    assert_eq!(compute_rate(&events, start, end), 2.0 / (15.0 / 3600.0));
    assert_eq!(compute_rate(&events, start, start), 0.0);

    let report = NightlyReport::build(&events, start, end, &Default::default());
    assert_eq!(report.count(EventKind::Plm), 2);
    assert_eq!(report.count(EventKind::Rejected), 1);
    assert!(report.alert);
    assert_eq!(report.bins.len(), 1);
}

#[test]
fn missing_files_are_errors_without_data() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_movement_file(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, PlmError::FileNotFound { .. }));
    assert!(!err.is_warning());
}
