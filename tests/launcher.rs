#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

const RUNNER: &str = env!("CARGO_BIN_EXE_qemu-runner");

/// Working directory with a fake `qemu-system-x86_64` on its `PATH`.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    /// The fake QEMU records its arguments (one per line) in `qemu-args` and exits with
    /// `exit_code`.
    fn with_qemu(exit_code: i32) -> Self {
        let sandbox = Self::empty();
        let qemu = sandbox.bin().join("qemu-system-x86_64");
        let script = format!(
            "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > qemu-args\nexit {exit_code}\n"
        );
        fs::write(&qemu, script).unwrap();
        fs::set_permissions(&qemu, fs::Permissions::from_mode(0o755)).unwrap();
        sandbox
    }

    fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("bin")).unwrap();
        Sandbox { dir }
    }

    fn bin(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(RUNNER)
            .args(args)
            .current_dir(self.path())
            .env("PATH", self.bin())
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    /// Arguments the fake QEMU was started with, if it ran at all
    fn qemu_args(&self) -> Option<Vec<String>> {
        fs::read_to_string(self.path().join("qemu-args"))
            .ok()
            .map(|args| args.lines().map(String::from).collect())
    }
}

fn contains_seq(haystack: &[String], needle: &[&str]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window.iter().zip(needle).all(|(a, b)| a == b))
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn forwards_child_exit_code() {
    let sandbox = Sandbox::with_qemu(7);
    let output = sandbox.run(&["--image", "test.iso", "--serial", "stdio", "--kvm"]);

    assert_eq!(output.status.code(), Some(7));
    let args = sandbox.qemu_args().unwrap();
    assert!(contains_seq(&args, &["-m", "2G", "-vga", "std"]));
    assert!(contains_seq(&args, &["-cdrom", "test.iso"]));
    assert!(contains_seq(&args, &["-serial", "mon:stdio"]));
    assert!(contains_seq(&args, &["-cpu", "host", "-enable-kvm"]));
}

#[test]
fn successful_run() {
    let sandbox = Sandbox::with_qemu(0);
    let output = sandbox.run(&["--smp", "1"]);

    assert_eq!(output.status.code(), Some(0));
    let args = sandbox.qemu_args().unwrap();
    assert!(!args.iter().any(|arg| arg == "-smp"));
    assert!(contains_seq(&args, &["-cdrom", "aster-x86_64.iso"]));
}

#[test]
fn verbose_prints_command_line() {
    let sandbox = Sandbox::with_qemu(0);
    let output = sandbox.run(&["--verbose", "--smp", "4"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"qemu-system-x86_64\""));
    assert!(stdout.contains("\"-smp\", \"4\""));
}

#[test]
fn invalid_image_type() {
    let sandbox = Sandbox::with_qemu(0);
    let output = sandbox.run(&["--image", "kernel.img", "--serial", "file"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(
        lines,
        [
            "Error: Invalid image type '.img'",
            "Error: Supported types are .hdd, .iso"
        ]
    );
    assert!(sandbox.qemu_args().is_none());
    assert!(!sandbox.path().join("qemu-runner").exists());
}

#[test]
fn missing_qemu() {
    let sandbox = Sandbox::empty();
    let output = sandbox.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("Error: Could not find file 'qemu-system-x86_64'"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn log_files_share_timestamp() {
    let sandbox = Sandbox::with_qemu(0);
    let output = sandbox.run(&["--debugcon", "file", "--log", "file", "--serial", "file"]);
    assert_eq!(output.status.code(), Some(0));

    let root = sandbox.path().join("qemu-runner");
    for category in ["debugcon", "log", "serial"] {
        assert!(root.join(category).is_dir());
    }

    let args = sandbox.qemu_args().unwrap();
    let value = |flag: &str| {
        let index = args.iter().position(|arg| arg == flag).unwrap();
        args[index + 1].clone()
    };
    let debugcon = value("-debugcon");
    let log = value("-D");
    let serial = value("-serial");

    let stamp = log
        .strip_prefix("qemu-runner/log/")
        .and_then(|name| name.strip_suffix(".log"))
        .unwrap()
        .to_string();
    assert_eq!(stamp.len(), "YYYY-MM-DD_HH-MM-SS".len());
    assert_eq!(debugcon, format!("file:qemu-runner/debugcon/{stamp}.log"));
    assert_eq!(serial, format!("file:qemu-runner/serial/{stamp}.log"));
}

#[test]
fn rejects_unknown_flag() {
    let sandbox = Sandbox::with_qemu(0);
    let output = sandbox.run(&["--arch", "aarch64"]);

    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(0));
    assert!(sandbox.qemu_args().is_none());
}
