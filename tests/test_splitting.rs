use pathobject::{PathType, SplitAll};

fn parts(split: &SplitAll) -> Vec<&str> {
    split.parts().iter().map(String::as_str).collect()
}

#[test]
fn splitall_absolute() {
    _ = tracing_subscriber::fmt::try_init();

    let nt = PathType::nt();
    let split = nt.path(r"C:\a\b\c").splitall().unwrap();
    assert_eq!(split.anchor(), Some(&nt.path(r"C:\")));
    assert_eq!(parts(&split), ["a", "b", "c"]);
    assert_eq!(split.len(), 4);

    let posix = PathType::posix();
    let split = posix.path("/usr/local/bin").splitall().unwrap();
    assert_eq!(split.anchor(), Some(&posix.path("/")));
    assert_eq!(parts(&split), ["usr", "local", "bin"]);
    assert_eq!(
        format!("{split:?}"),
        r#"[POSIXPath("/"), "usr", "local", "bin"]"#
    );

    let split = posix.path("/a/b/c").splitall().unwrap();
    assert_eq!(format!("{split:?}"), r#"[POSIXPath("/"), "a", "b", "c"]"#);
    assert_eq!(split.join().unwrap(), posix.path("/a/b/c"));

    let split = posix.path("/").splitall().unwrap();
    assert_eq!(split.anchor(), Some(&posix.path("/")));
    assert!(split.parts().is_empty());
}

#[test]
fn splitall_anchor_keeps_path_type() {
    let nt = PathType::nt().with_name("WinPath");
    let split = nt.path(r"C:\x").splitall().unwrap();
    let anchor = split.anchor().unwrap();
    assert_eq!(anchor.path_type().name(), "WinPath");
    assert_eq!(format!("{anchor:?}"), r#"WinPath("C:\\")"#);
}

#[test]
fn splitall_relative() {
    let posix = PathType::posix();

    let split = posix.path("a/b/c").splitall().unwrap();
    assert_eq!(split.anchor(), None);
    assert_eq!(parts(&split), ["a", "b", "c"]);

    let split = posix.path("./a").splitall().unwrap();
    assert_eq!(split.anchor(), None);
    assert_eq!(parts(&split), [".", "a"]);

    let split = posix.path("../x/y").splitall().unwrap();
    assert_eq!(parts(&split), ["..", "x", "y"]);

    let split = posix.path("").splitall().unwrap();
    assert!(split.is_empty());
}

#[test]
fn splitall_drive_relative() {
    let nt = PathType::nt();
    let split = nt.path(r"C:foo\bar").splitall().unwrap();
    assert_eq!(split.anchor(), Some(&nt.path("C:")));
    assert_eq!(parts(&split), ["foo", "bar"]);
}

#[test]
fn splitall_unc() {
    let nt = PathType::nt();
    let split = nt.path(r"\\server\share\dir\file").splitall().unwrap();
    assert_eq!(split.anchor(), Some(&nt.path(r"\\server\share\")));
    assert_eq!(parts(&split), ["dir", "file"]);
}

#[test]
fn splitall_trailing_separator() {
    let posix = PathType::posix();
    let split = posix.path("/a/b/").splitall().unwrap();
    assert_eq!(parts(&split), ["a", "b", ""]);
    assert_eq!(split.join().unwrap(), "/a/b/");
}

#[test]
fn splitall_rejoins() {
    let nt = PathType::nt();
    let posix = PathType::posix();
    let cases = [
        nt.path(r"C:\a\b\c"),
        nt.path(r"C:a\b"),
        nt.path(r"\\server\share\x\y"),
        nt.path(r"a\\b\.\c"),
        nt.path(r"\\server"),
        nt.path("C:/mixed/seps"),
        posix.path("/usr/local/bin"),
        posix.path("//net/x"),
        posix.path("a//b/./c/"),
        posix.path("../a"),
    ];

    for path in cases {
        let rejoined = path.splitall().unwrap().join().unwrap();
        assert_eq!(
            rejoined.normalize().unwrap(),
            path.normalize().unwrap(),
            "{path:?} rejoined as {rejoined:?}"
        );
        assert_eq!(rejoined.path_type(), path.path_type());
    }
}

#[test]
fn splitdrive() {
    let nt = PathType::nt();
    let (drive, rest) = nt
        .path(r"C:\Documents and Settings\Zack")
        .splitdrive()
        .unwrap();
    assert_eq!(format!("{drive:?}"), r#"NTPath("C:")"#);
    assert_eq!(rest, r"\Documents and Settings\Zack");

    let path = nt.path(r"C:\dir\file");
    let (drive, rest) = path.splitdrive().unwrap();
    assert_eq!(drive, nt.path("C:"));
    assert_eq!(rest, r"\dir\file");
    assert_eq!(drive.concat(&rest), path);
    assert_eq!(path.drive().unwrap(), "C:");

    let (drive, rest) = nt.path(r"\\host\share\x").splitdrive().unwrap();
    assert_eq!(drive, r"\\host\share");
    assert_eq!(rest, r"\x");

    let (drive, rest) = nt.path(r"relative\x").splitdrive().unwrap();
    assert!(drive.is_empty());
    assert_eq!(rest, r"relative\x");

    let posix = PathType::posix();
    let (drive, rest) = posix.path("/etc/hosts").splitdrive().unwrap();
    assert_eq!(drive, posix.path(""));
    assert_eq!(rest, "/etc/hosts");
}

#[test]
fn splitpath() {
    let nt = PathType::nt();
    let (parent, name) = nt.path(r"C:\a\b").splitpath().unwrap();
    assert_eq!(parent, nt.path(r"C:\a"));
    assert_eq!(name, "b");

    let posix = PathType::posix();
    let (parent, name) = posix.path("/a").splitpath().unwrap();
    assert_eq!(parent, posix.path("/"));
    assert_eq!(name, "a");
}
