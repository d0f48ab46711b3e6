use std::io;
use std::path::PathBuf;

use starter::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::DestinationExists { destination: PathBuf::from("work/myapp") };
    assert_eq!(err.to_string(), "Destination directory 'work/myapp' already exists.");

    let err = Error::DownloadFailed {
        url: "http://localhost/t.zip".to_string(),
        reason: "HTTP status 500 Internal Server Error".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Failed to download template from 'http://localhost/t.zip': HTTP status 500 Internal Server Error."
    );

    let err = Error::ValidationError { name: "".to_string(), reason: "empty".to_string() };
    assert_eq!(err.to_string(), "Invalid project name '': empty.");
}

#[test]
fn test_write_error_keeps_source() {
    use std::error::Error as _;

    let err = Error::WriteError {
        path: PathBuf::from("out.txt"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("Failed to write 'out.txt'"));
}
