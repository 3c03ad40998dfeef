use super::*;

#[test]
fn test_fixture_writes_nested_files() {
    let fixture = TempDirFixture::new().unwrap();
    let path = fixture.write_file("prisma/dev.db", "").unwrap();

    assert!(path.ends_with("prisma/dev.db"));
    assert!(fixture.file_exists("prisma/dev.db"));
    assert!(fixture.path().join("prisma").is_dir());
}

#[test]
fn test_fixture_round_trips_content() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file(".env", "PORT=3000\n").unwrap();

    assert_eq!(fixture.read_file(".env").unwrap(), "PORT=3000\n");
}

#[test]
fn test_fixture_cleans_up_on_drop() {
    let path = {
        let fixture = TempDirFixture::new().unwrap();
        fixture.create_dir("node_modules").unwrap();
        fixture.path().to_path_buf()
    };

    assert!(!path.exists());
}
