//! End-to-end tests against a scripted daemon on a real Unix socket

use bird_client::{BirdClient, BirdError, ClientConfig, ErrorClass, FieldValue, ServerError};
use bird_test::{fixtures, MockBird};
use pretty_assertions::assert_eq;

fn counts(pairs: &[(&str, u64)]) -> FieldValue {
    FieldValue::map(pairs.iter().map(|&(k, v)| (k, FieldValue::Count(v))))
}

fn change_counts(
    received: u64,
    rejected: u64,
    filtered: u64,
    ignored: u64,
    accepted: u64,
) -> FieldValue {
    counts(&[
        ("received", received),
        ("rejected", rejected),
        ("filtered", filtered),
        ("ignored", ignored),
        ("accepted", accepted),
    ])
}

#[test]
fn test_show_protocols_all() {
    let mock = MockBird::builder()
        .reply(fixtures::SHOW_PROTOCOLS_ALL)
        .start()
        .expect("Failed to start mock daemon");

    let mut client = BirdClient::connect(mock.socket_path()).expect("Failed to connect");
    let protocols = client.get_protocols().expect("Failed to query protocols");

    assert_eq!(
        protocols.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["bgp_backup", "bgp_uplink", "device1", "kernel1"]
    );

    let device = &protocols["device1"];
    assert_eq!(device.text("proto"), Some("Device"));
    assert_eq!(device.text("state"), Some("up"));
    assert_eq!(device.count("preference"), Some(240));
    assert!(!device.contains("info"));

    let kernel = &protocols["kernel1"];
    assert_eq!(
        kernel.get("route_stats"),
        Some(&counts(&[("imported", 3), ("exported", 12), ("preferred", 3)]))
    );

    let uplink = &protocols["bgp_uplink"];
    assert_eq!(uplink.text("info"), Some("Established"));
    assert_eq!(uplink.count("preference"), Some(100));
    assert_eq!(uplink.count("import_limit"), Some(1000));
    assert_eq!(
        uplink.get("route_stats"),
        Some(&counts(&[
            ("imported", 12),
            ("filtered", 1),
            ("exported", 3),
            ("preferred", 10),
        ]))
    );
    assert_eq!(
        uplink.get("route_change_stats"),
        Some(&FieldValue::map([
            ("import_updates", change_counts(15, 0, 1, 2, 12)),
            ("import_withdraws", change_counts(2, 0, 0, 0, 2)),
            ("export_updates", change_counts(20, 5, 0, 0, 15)),
            ("export_withdraws", change_counts(0, 0, 0, 0, 0)),
        ]))
    );
    assert_eq!(uplink.text("bgp_state"), Some("established"));
    assert_eq!(uplink.text("bgp_neighbor_address"), Some("192.0.2.2"));
    assert_eq!(uplink.count("bgp_neighbor_as"), Some(64512));
    assert_eq!(uplink.text("bgp_neighbor_id"), Some("192.0.2.2"));
    assert_eq!(
        uplink.text("bgp_neighbor_caps"),
        Some("refresh enhanced-refresh restart-aware as4")
    );
    assert_eq!(uplink.text("bgp_source_address"), Some("192.0.2.1"));

    let backup = &protocols["bgp_backup"];
    assert_eq!(backup.text("state"), Some("start"));
    assert_eq!(backup.text("info"), Some("Connect"));
    assert_eq!(backup.text("bgp_state"), Some("connect"));
    assert_eq!(backup.text("last_error"), Some("Socket: Connection refused"));
    assert!(!backup.contains("route_change_stats"));

    drop(client);
    assert_eq!(mock.finish().unwrap(), vec!["show protocols all"]);
}

#[test]
fn test_fragmented_reply_is_identical() {
    let whole = MockBird::builder()
        .reply(fixtures::SHOW_PROTOCOLS_ALL)
        .start()
        .unwrap();
    let expected = BirdClient::connect(whole.socket_path())
        .unwrap()
        .get_protocols()
        .unwrap();

    let fragmented = MockBird::builder()
        .fragment(7)
        .reply(fixtures::SHOW_PROTOCOLS_ALL)
        .start()
        .unwrap();
    let config = ClientConfig {
        read_chunk_size: 16,
        ..ClientConfig::for_socket(fragmented.socket_path())
    };
    let actual = BirdClient::with_config(&config)
        .unwrap()
        .get_protocols()
        .unwrap();

    assert_eq!(actual, expected);
}

#[test]
fn test_single_protocol_bird2_layout() {
    let mock = MockBird::builder()
        .reply(fixtures::SHOW_PROTOCOL_BIRD2)
        .start()
        .unwrap();

    let mut client = BirdClient::connect(mock.socket_path()).unwrap();
    let protocols = client.get_protocol(Some("bgp_v2")).unwrap();

    let bgp = &protocols["bgp_v2"];
    assert_eq!(bgp.text("name"), Some("bgp_v2"));
    assert_eq!(bgp.text("table"), Some("---"));
    assert_eq!(bgp.count("preference"), Some(100));
    assert_eq!(bgp.count("receive_limit"), Some(500));
    assert_eq!(bgp.count("export_limit"), Some(200));
    assert_eq!(bgp.text("bgp_neighbor_address"), Some("2001:db8::2"));
    assert_eq!(
        bgp.get("route_stats"),
        Some(&counts(&[("imported", 7), ("exported", 4), ("preferred", 6)]))
    );

    drop(client);
    assert_eq!(mock.finish().unwrap(), vec!["show protocols all bgp_v2"]);
}

#[test]
fn test_empty_protocol_table() {
    let mock = MockBird::builder()
        .reply(fixtures::SHOW_PROTOCOLS_EMPTY)
        .start()
        .unwrap();

    let mut client = BirdClient::connect(mock.socket_path()).unwrap();
    assert!(client.get_protocols().unwrap().is_empty());
}

#[test]
fn test_no_protocols_match() {
    let mock = MockBird::builder()
        .reply(fixtures::NO_PROTOCOLS_MATCH)
        .reply(fixtures::SHOW_STATUS)
        .start()
        .unwrap();

    let mut client = BirdClient::connect(mock.socket_path()).unwrap();
    let err = client.get_protocol(Some("missing")).unwrap_err();
    assert_eq!(err.server_error(), Some(ServerError::NoProtocolsMatch));
    assert_eq!(err.to_string(), "No protocols match");
    assert_eq!(err.class(), ErrorClass::Server);

    // The session is still usable after a server error
    let status = client.execute("show status").unwrap();
    assert_eq!(status.last().unwrap().payload, "Daemon is up and running");

    drop(client);
    assert_eq!(
        mock.finish().unwrap(),
        vec!["show protocols all missing", "show status"]
    );
}

#[test]
fn test_execute_raw_command() {
    let mock = MockBird::builder()
        .fragment(3)
        .reply(fixtures::SHOW_STATUS)
        .start()
        .unwrap();

    let mut client = BirdClient::connect(mock.socket_path()).unwrap();
    let lines = client.execute("show status").unwrap();

    let rendered: Vec<String> = lines.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "1000-BIRD 1.6.8",
            "1011-Router ID is 10.0.0.1",
            "1011-Current server time is 2024-03-01 12:00:00",
            "1011-Last reboot on 2024-02-28 08:15:02",
            "1011-Last reconfiguration on 2024-02-28 08:15:02",
            "0013 Daemon is up and running",
        ]
    );
}

#[test]
fn test_parse_error_reply() {
    let mock = MockBird::builder()
        .reply(fixtures::PARSE_ERROR)
        .start()
        .unwrap();

    let mut client = BirdClient::connect(mock.socket_path()).unwrap();
    let err = client.execute("shwo status").unwrap_err();
    assert_eq!(err.server_error(), Some(ServerError::ParseError));
    assert!(err.is_protocol_error());
}

#[test]
fn test_unexpected_banner() {
    let mock = MockBird::builder()
        .banner("1000 BIRD 1.6.8\n")
        .start()
        .unwrap();

    let err = BirdClient::connect(mock.socket_path()).unwrap_err();
    assert!(matches!(err, BirdError::Handshake { .. }));
    assert!(err.is_protocol_error());
}

#[test]
fn test_daemon_closes_before_banner() {
    let mock = MockBird::builder().banner("").start().unwrap();

    match BirdClient::connect(mock.socket_path()) {
        Err(BirdError::UnexpectedEof { buffered }) => assert_eq!(buffered, 0),
        other => panic!("Expected UnexpectedEof, got {:?}", other),
    }
}

#[test]
fn test_daemon_closes_mid_reply() {
    let mock = MockBird::builder()
        .reply(
            "2002-name proto table state since info\n\
             1002-bgp1 BGP master up 10:00 Established\n\
             1006-  Pref",
        )
        .start()
        .unwrap();

    let mut client = BirdClient::connect(mock.socket_path()).unwrap();
    let err = client.get_protocols().unwrap_err();
    assert!(matches!(err, BirdError::UnexpectedEof { buffered: 11 }));
    assert_eq!(err.class(), ErrorClass::Framing);
}

#[test]
fn test_malformed_reply_line() {
    let mock = MockBird::builder()
        .reply("this is not bird\n0000 \n")
        .start()
        .unwrap();

    let mut client = BirdClient::connect(mock.socket_path()).unwrap();
    match client.execute("show status") {
        Err(BirdError::MalformedLine { line }) => assert_eq!(line, "this is not bird"),
        other => panic!("Expected MalformedLine, got {:?}", other),
    }
}

#[test]
fn test_connect_missing_socket() {
    let dir = tempfile::tempdir().unwrap();
    let err = BirdClient::connect(dir.path().join("bird.ctl")).unwrap_err();
    assert!(matches!(err, BirdError::Connect { .. }));
    assert_eq!(err.class(), ErrorClass::Connection);
}
