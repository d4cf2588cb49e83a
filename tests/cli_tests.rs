use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn xtest() -> Command {
    let mut cmd = Command::cargo_bin("xtest").unwrap();
    cmd.env("LC_ALL", "C").env_remove("XTEST_LOG");
    cmd
}

/// The bundled sample suite has one intentionally failing case, so a plain run
/// exits with status 1 and reports two passes and one failure.
///
/// 自带的示例套件包含一个故意失败的用例，因此普通运行以状态 1 退出，
/// 并报告两个通过和一个失败。
#[test]
fn test_default_run_exits_with_failure_count() {
    xtest()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("name  : passing_case"))
        .stdout(predicate::str::contains("This test intentionally fails"))
        .stdout(predicate::str::ends_with(
            "[Xtest report system]\npass: 002, fail: 001\n",
        ));
}

/// Only the benchmark runs with `--only-mark`, and it passes.
/// 使用 `--only-mark` 时只运行基准测试，且其通过。
#[test]
fn test_only_mark_succeeds() {
    xtest()
        .arg("--only-mark")
        .assert()
        .success()
        .stdout(predicate::str::contains("unit test skipped by --only-mark"))
        .stdout(predicate::str::contains("pass: 001, fail: 000"));
}

#[test]
fn test_verbose_report_counts() {
    xtest()
        .arg("--verbose")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[Running Test Case]"))
        .stdout(predicate::str::contains(
            "pass: 002, fail: 001, skip: 000, total: 003",
        ));
}

#[test]
fn test_only_test_verbose_counts_skipped_benchmark() {
    xtest()
        .args(["--only-test", "--verbose"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "pass: 001, fail: 001, skip: 001, total: 003",
        ));
}

#[test]
fn test_cutback_report() {
    xtest()
        .arg("--cutback")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("name: failing_case, type: unit\n[F]\n"))
        .stdout(predicate::str::contains("result: fail"));
}

/// An out-of-range repeat count is a usage error: nothing runs and the
/// process exits with status 1.
///
/// 超出范围的重复次数属于用法错误：不运行任何用例，进程以状态 1 退出。
#[test]
fn test_repeat_out_of_range_is_usage_error() {
    xtest()
        .args(["--repeat", "0"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--repeat value must be between 1 and 100"));
}

/// `cargo bench` starts harness-less binaries with `--bench`. Unknown arguments
/// are skipped, so the suite still runs.
///
/// `cargo bench` 会以 `--bench` 启动无 harness 的二进制文件。未知参数会被跳过，
/// 因此套件仍会运行。
#[test]
fn test_unknown_arguments_are_skipped() {
    xtest()
        .args(["--bench", "--no-such-flag", "--only-mark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name  : sum_bench"))
        .stdout(predicate::str::contains("pass: 001, fail: 000"));
}

#[test]
fn test_missing_repeat_value_is_usage_error() {
    xtest()
        .args(["--bench", "--repeat"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_help_succeeds() {
    xtest()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--repeat"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version_succeeds() {
    xtest()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_dry_run_succeeds_without_running_cases() {
    xtest()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Xtest report system]"))
        .stdout(predicate::str::contains("pass: 000, fail: 000"))
        .stdout(predicate::str::contains("passing_case").not());
}

#[test]
fn test_wrong_config_name_fails() {
    xtest()
        .args(["--config", "config.ini"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("xtest_config.ini"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = tempdir().unwrap();
    xtest()
        .current_dir(temp_dir.path())
        .args(["--config", "xtest_config.ini"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not open config file"));
}

/// Keys in `xtest_config.ini` are applied on top of the command line.
/// `xtest_config.ini` 中的键值会覆盖命令行参数。
#[test]
fn test_config_file_is_applied() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("xtest_config.ini"),
        "cutback=true\nonly_mark=true\niter_repeat=3\n",
    )
    .unwrap();

    xtest()
        .current_dir(temp_dir.path())
        .args(["--verbose", "--config", "xtest_config.ini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name  : sum_bench\nnumber: 0003\ntype: Benchmark\n"))
        .stdout(predicate::str::contains("message: unit test skipped by --only-mark\n"))
        .stdout(predicate::str::contains(
            "message: sum of the first 10k integers\nresult: PASS\n",
        ))
        .stdout(predicate::str::contains("ignore:").not());
}
