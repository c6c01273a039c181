use std::sync::Arc;

use pathobject::{Error, PathType, WriteText};
use tests::mock_io::*;

#[test]
fn read_and_write_bytes() {
    _ = tracing_subscriber::fmt::try_init();

    let io = Arc::new(MockIo::default());
    let posix = io.bind(&PathType::posix());
    let file = posix.path("/data/blob.bin");

    file.write_bytes(&[1, 2, 3], false).unwrap();
    file.write_bytes(&[4], true).unwrap();
    assert!(io.did_write_file("/data/blob.bin"));
    assert_eq!(file.bytes().unwrap(), [1, 2, 3, 4]);
    assert!(io.did_read_file("/data/blob.bin"));

    file.write_bytes(&[9], false).unwrap();
    assert_eq!(io.file("/data/blob.bin").unwrap(), [9]);
}

#[test]
fn missing_file() {
    let io = Arc::new(MockIo::default());
    let posix = io.bind(&PathType::posix());
    match posix.path("/missing").bytes() {
        Err(Error::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn text_translates_newlines() {
    let io = Arc::new(MockIo::default().with_files([(
        "/mixed.txt",
        "one\r\ntwo\rthree\nfour\u{2028}",
    )]));
    let posix = io.bind(&PathType::posix());
    assert_eq!(
        posix.path("/mixed.txt").text().unwrap(),
        "one\ntwo\nthree\nfour\n"
    );

    io.filesystem
        .lock()
        .insert(String::from("/latin1"), vec![b'c', b'a', b'f', 0xe9]);
    match posix.path("/latin1").text() {
        Err(Error::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::InvalidData),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn write_text_line_separators() {
    let io = Arc::new(MockIo::default());
    let nt = io.bind(&PathType::nt());
    let file = nt.path(r"C:\out.txt");

    let crlf = WriteText {
        linesep: Some("\r\n".into()),
        append: false,
    };
    file.write_text("a\nb\r\nc", &crlf).unwrap();
    assert_eq!(io.file(r"C:\out.txt").unwrap(), b"a\r\nb\r\nc");

    let lf = WriteText {
        linesep: Some("\n".into()),
        append: true,
    };
    file.write_text("\rd\n", &lf).unwrap();
    assert_eq!(io.file(r"C:\out.txt").unwrap(), b"a\r\nb\r\nc\nd\n");

    file.write_text("raw\r\n", &WriteText::verbatim()).unwrap();
    assert_eq!(io.file(r"C:\out.txt").unwrap(), b"raw\r\n");

    file.write_text("more", &WriteText::append()).unwrap();
    assert_eq!(file.text().unwrap(), "raw\nmore");
}

#[test]
fn binding_io_keeps_dialect() {
    let io = Arc::new(MockIo::default());
    let posix = io.bind(&PathType::posix().with_name("MockPath"));
    assert_eq!(posix, PathType::posix());
    assert_eq!(posix.name(), "MockPath");

    posix.path("/f").write_bytes(b"x", false).unwrap();
    assert!(io.did_write_file("/f"));
    assert_eq!(posix.path("/f").bytes().unwrap(), b"x");
}
