use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match quickstart_lib::main().await {
        Ok(code) => code,
        Err(e) => {
            quickstart_lib::report_unexpected(&e);
            ExitCode::FAILURE
        }
    }
}
