//! Shared harness for CLI integration tests.
//!
//! Each case runs the `tdc` binary with captured output and writes a
//! combined log under the target tmpdir so a failing case can be
//! inspected after the run.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Captured outcome of one CLI invocation.
pub struct CliCaseResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

/// Run the binary with the given arguments and an empty stdin.
pub fn run_cli_case(case_name: &str, args: &[&str]) -> CliCaseResult {
    run_cli_case_with_stdin(case_name, args, "")
}

/// Run the binary feeding `stdin_data` to its standard input.
pub fn run_cli_case_with_stdin(case_name: &str, args: &[&str], stdin_data: &str) -> CliCaseResult {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tdc"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn tdc binary");

    // Best-effort: a child that rejects its input early closes the pipe
    // before everything is written.
    let _ = child
        .stdin
        .as_mut()
        .expect("child stdin is piped")
        .write_all(stdin_data.as_bytes());

    let output = child.wait_with_output().expect("wait for tdc");
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    let log_path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(format!("{case_name}.log"));
    let log = format!(
        "case: {case_name}\nargs: {args:?}\nstdin: {stdin_data:?}\nstatus: {:?}\n\
         --- stdout ---\n{stdout}\n--- stderr ---\n{stderr}\n",
        output.status
    );
    std::fs::write(&log_path, log).expect("write case log");

    CliCaseResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}
