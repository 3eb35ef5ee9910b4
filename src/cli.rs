use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// QEMU Runner. Launches `qemu-system-<arch>` with the selected options.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, author)]
pub(crate) struct Args {
    /// CPU architecture
    #[arg(long, value_enum, default_value_t = Arch::X86_64)]
    pub arch: Arch,

    /// Boot with legacy BIOS
    #[arg(long, action)]
    pub bios: bool,

    /// Run QEMU for debugging with GDB
    #[arg(long, action)]
    pub debug: bool,

    /// Enable QEMU debugcon
    #[arg(long, value_enum)]
    pub debugcon: Option<DebugconMode>,

    /// Image to boot (defaults to `aster-<arch>.iso`)
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Enable KVM
    #[arg(long, action)]
    pub kvm: bool,

    /// Enable QEMU logs
    #[arg(long, value_enum)]
    pub log: Option<LogMode>,

    /// Enable QEMU monitor (stdio only)
    #[arg(long, action)]
    pub monitor: bool,

    /// Enable QEMU serial logging
    #[arg(long, value_enum)]
    pub serial: Option<SerialMode>,

    /// Number of CPUs
    #[arg(long, value_name = "COUNT", default_value = "1")]
    pub smp: String,

    /// Print the QEMU command line
    #[arg(long, action)]
    pub verbose: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Arch {
    #[value(name = "x86_64")]
    X86_64,
}

impl Arch {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
        }
    }

    /// Whether legacy BIOS boot is available for this architecture
    pub(crate) fn supports_bios(&self) -> bool {
        matches!(self, Arch::X86_64)
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DebugconMode {
    File,
    Stdio,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum LogMode {
    File,
    Stderr,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SerialMode {
    File,
    Stdio,
}
