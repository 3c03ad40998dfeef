use super::*;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::*;
use crate::launcher::envfile::EnvFileState;
use crate::platform::PlatformInfo;

fn toolchain() -> Toolchain {
    Toolchain::for_platform(&PlatformInfo {
        os: "linux",
        arch: "x86_64",
    })
}

fn project() -> PathBuf {
    PathBuf::from("/test/project")
}

fn db() -> PathBuf {
    project().join("prisma/dev.db")
}

fn env_with(url: &str) -> EnvFile {
    EnvFile {
        path: project().join(".env"),
        state: EnvFileState::Existing,
        values: vec![("DATABASE_URL".to_string(), url.to_string())],
    }
}

#[test]
fn test_database_path_from_relative_file_url() {
    let env = env_with("file:./dev.db");
    assert_eq!(database_path(&project(), Some(&env)), db());

    let env = env_with("file:data/app.db?connection_limit=1");
    assert_eq!(
        database_path(&project(), Some(&env)),
        project().join("prisma/data/app.db")
    );
}

#[test]
fn test_database_path_from_absolute_file_url() {
    let env = env_with("file:/var/lib/app/prod.db");
    assert_eq!(
        database_path(&project(), Some(&env)),
        PathBuf::from("/var/lib/app/prod.db")
    );
}

#[test]
fn test_database_path_falls_back_to_default() {
    assert_eq!(database_path(&project(), None), db());

    let env = env_with("postgresql://localhost/app");
    assert_eq!(database_path(&project(), Some(&env)), db());
}

#[test]
fn test_fresh_database_is_pushed_then_seeded() {
    let session = MockCommandSession::new();

    let outcome = provision_database(&session, &toolchain(), &project(), &db(), false).unwrap();

    assert_eq!(outcome, DatabaseOutcome::Created);
    assert_eq!(
        session.process_provider.get_command_lines(),
        vec!["npx prisma generate", "npx prisma db push", "npx prisma db seed"]
    );
    assert!(
        session
            .process_provider
            .get_calls()
            .iter()
            .all(|call| call.working_dir == Some(project()))
    );
}

#[test]
fn test_existing_database_is_never_seeded() {
    let session = MockCommandSession::new()
        .with_filesystem(MockFileSystemProvider::new().with_file(db(), ""));

    let outcome = provision_database(&session, &toolchain(), &project(), &db(), false).unwrap();

    assert_eq!(outcome, DatabaseOutcome::Migrated);
    assert_eq!(
        session.process_provider.get_command_lines(),
        vec!["npx prisma generate", "npx prisma db push"]
    );
}

#[test]
fn test_force_seed_recreates_existing_database() {
    let session = MockCommandSession::new()
        .with_filesystem(MockFileSystemProvider::new().with_file(db(), "sqlite"));

    let outcome = provision_database(&session, &toolchain(), &project(), &db(), true).unwrap();

    assert_eq!(outcome, DatabaseOutcome::Created);
    assert!(session.filesystem_provider.file_content(&db()).is_none());
    assert!(
        session
            .process_provider
            .get_command_lines()
            .contains(&"npx prisma db seed".to_string())
    );
    assert!(
        session
            .display_provider
            .has_message("warning", "Recreating the database")
    );
}

#[test]
fn test_force_seed_without_database_just_creates() {
    let session = MockCommandSession::new();

    let outcome = provision_database(&session, &toolchain(), &project(), &db(), true).unwrap();

    assert_eq!(outcome, DatabaseOutcome::Created);
    assert_eq!(session.display_provider.count_calls("warning"), 0);
}

#[test]
fn test_generate_failure_stops_provisioning() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new().with_runner_result(
            &["prisma", "generate"],
            Ok(ProcessOutput::exited(1)),
        ),
    );

    let error = provision_database(&session, &toolchain(), &project(), &db(), false).unwrap_err();

    assert!(error.to_string().contains("Prisma client generation"));
    assert_eq!(
        session.process_provider.get_command_lines(),
        vec!["npx prisma generate"]
    );
}

#[test]
fn test_push_failure_skips_seed() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new()
            .with_runner_result(&["prisma", "db", "push"], Ok(ProcessOutput::exited(1))),
    );

    let error = provision_database(&session, &toolchain(), &project(), &db(), false).unwrap_err();

    assert!(matches!(error, StageError::Command { .. }));
    assert!(
        !session
            .process_provider
            .get_command_lines()
            .contains(&"npx prisma db seed".to_string())
    );
}

#[test]
fn test_seed_failure_is_fatal() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new()
            .with_runner_result(&["prisma", "db", "seed"], Ok(ProcessOutput::exited(1))),
    );

    let error = provision_database(&session, &toolchain(), &project(), &db(), false).unwrap_err();
    assert!(error.to_string().contains("Database seeding"));
}

#[test]
fn test_removal_failure_is_fatal() {
    let session = MockCommandSession::new().with_filesystem(
        MockFileSystemProvider::new()
            .with_file(db(), "sqlite")
            .with_read_only(),
    );

    let error = provision_database(&session, &toolchain(), &project(), &db(), true).unwrap_err();
    assert!(matches!(error, StageError::Filesystem { .. }));
}
