use super::*;
use crate::application::session::FileSystemProvider;
use crate::application::session_mocks::*;

fn project() -> PathBuf {
    PathBuf::from("/test/project")
}

#[test]
fn test_template_parses_cleanly() {
    let (values, problems) = parse_env(DEFAULT_ENV_TEMPLATE);

    assert!(problems.is_empty());
    let get = |key: &str| {
        values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };
    assert_eq!(get("DATABASE_URL").as_deref(), Some("file:./dev.db"));
    assert_eq!(get("NODE_ENV").as_deref(), Some("development"));
    assert_eq!(get("PORT").as_deref(), Some("3000"));
    assert_eq!(get("MATTERMOST_URL").as_deref(), Some(""));
}

#[test]
fn test_missing_env_file_is_created_from_template() {
    let session = MockCommandSession::new();

    let env_file = ensure_env_file(&session, &project()).unwrap();

    assert_eq!(env_file.state, EnvFileState::Created);
    let written = session
        .filesystem_provider
        .file_content(&project().join(".env"))
        .unwrap();
    assert_eq!(written, DEFAULT_ENV_TEMPLATE);
    assert!(written.contains("PORT=3000"));
    assert!(written.contains("NODE_ENV=\"development\""));
    assert!(session.display_provider.has_message("success", ".env file created"));
}

#[test]
fn test_existing_env_file_is_left_untouched() {
    let original = "DATABASE_URL=\"file:./custom.db\"\nNEXTAUTH_SECRET=s3cret\nPORT=4000\n";
    let session = MockCommandSession::new().with_filesystem(
        MockFileSystemProvider::new().with_file(project().join(".env"), original),
    );

    let env_file = ensure_env_file(&session, &project()).unwrap();

    assert_eq!(env_file.state, EnvFileState::Existing);
    assert_eq!(env_file.get("PORT"), Some("4000"));
    assert_eq!(
        session
            .filesystem_provider
            .read_to_string(&project().join(".env"))
            .unwrap(),
        original
    );
    assert_eq!(session.display_provider.count_calls("warning"), 0);
}

#[test]
fn test_missing_recommended_keys_warn() {
    let session = MockCommandSession::new().with_filesystem(
        MockFileSystemProvider::new().with_file(project().join(".env"), "PORT=3000\nNEXTAUTH_SECRET=\n"),
    );

    ensure_env_file(&session, &project()).unwrap();

    assert!(session.display_provider.has_message("warning", "DATABASE_URL"));
    assert!(session.display_provider.has_message("warning", "NEXTAUTH_SECRET"));
}

#[test]
fn test_unparsable_lines_warn_but_succeed() {
    let session = MockCommandSession::new().with_filesystem(
        MockFileSystemProvider::new().with_file(
            project().join(".env"),
            "DATABASE_URL=\"file:./dev.db\"\nNEXTAUTH_SECRET=x\nnot valid line\n",
        ),
    );

    let env_file = ensure_env_file(&session, &project()).unwrap();

    assert_eq!(env_file.get("DATABASE_URL"), Some("file:./dev.db"));
    assert!(session.display_provider.has_message("warning", "Could not parse .env"));
}

#[test]
fn test_write_failure_is_fatal() {
    let session = MockCommandSession::new()
        .with_filesystem(MockFileSystemProvider::new().with_read_only());

    let error = ensure_env_file(&session, &project()).unwrap_err();
    assert!(matches!(error, StageError::Filesystem { .. }));
}

#[test]
fn test_last_assignment_wins() {
    let env_file = EnvFile {
        path: project().join(".env"),
        state: EnvFileState::Existing,
        values: vec![
            ("PORT".to_string(), "3000".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ],
    };
    assert_eq!(env_file.get("PORT"), Some("8080"));
    assert_eq!(env_file.get("MISSING"), None);
}
