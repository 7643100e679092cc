use kindling_sdk::{ProbeConfig, ProbeError};
use std::io::Write;

#[test]
fn load_reads_toml_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
max_consecutive_errors = 0

[[subscriptions]]
name = "syscall_exit-sendto"
category = "net"
"#
    )
    .unwrap();

    let config = ProbeConfig::load(file.path()).unwrap();
    assert_eq!(config.max_consecutive_errors, 0);
    assert_eq!(config.channel_capacity, 4096);
    let subs = config.subscriptions().unwrap();
    assert_eq!(subs[0].to_string(), "syscall_exit-sendto:net");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProbeConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ProbeError::Io(_)));
}
