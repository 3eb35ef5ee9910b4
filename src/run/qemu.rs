use std::path::Path;

use crate::{
    cli::{Arch, DebugconMode, SerialMode},
    run::{
        config::{ImageType, RunConfig},
        logs::LogFiles,
    },
};

/// Builds the QEMU command line (executable first) for the specified config.
pub(crate) fn command_line(config: &RunConfig, logs: &LogFiles) -> Vec<String> {
    let mut cmd = vec![config.qemu()];

    cmd.extend(flags(&["-m", "2G", "-vga", "std"]));

    if config.arch == Arch::X86_64 {
        cmd.extend(flags(&["-M", "q35"]));
    }

    if config.bios {
        cmd.extend(flags(&["-boot", "d"]));
    } else {
        cmd.push("-drive".into());
        cmd.push(format!(
            "if=pflash,unit=0,format=raw,file=ovmf/ovmf-code-{}.fd,readonly=on",
            config.arch.as_str()
        ));
    }

    if config.debug {
        cmd.extend(flags(&["-s", "-S"]));
    }

    match (config.debugcon, &logs.debugcon) {
        (Some(DebugconMode::File), Some(path)) => {
            cmd.push("-debugcon".into());
            cmd.push(format!("file:{}", display(path)));
        }
        (Some(DebugconMode::Stdio), _) => cmd.extend(flags(&["-debugcon", "stdio"])),
        _ => {}
    }

    match config.image_type {
        ImageType::Hdd => cmd.push("-hda".into()),
        ImageType::Iso => cmd.push("-cdrom".into()),
    }
    cmd.push(display(&config.image));

    if config.kvm {
        cmd.extend(flags(&["-cpu", "host", "-enable-kvm"]));
    }

    if let Some(path) = &logs.log {
        cmd.push("-D".into());
        cmd.push(display(path));
    }

    // `stderr` mode relies on QEMU's default log target
    if config.log.is_some() {
        cmd.extend(flags(&["-d", "int", "-M", "smm=off", "-no-reboot", "-no-shutdown"]));
    }

    if config.monitor {
        cmd.extend(flags(&["-monitor", "stdio"]));
    }

    match (config.serial, &logs.serial) {
        (Some(SerialMode::File), Some(path)) => {
            cmd.push("-serial".into());
            cmd.push(format!("file:{}", display(path)));
        }
        (Some(SerialMode::Stdio), _) => cmd.extend(flags(&["-serial", "mon:stdio"])),
        _ => {}
    }

    if config.smp != "1" {
        cmd.push("-smp".into());
        cmd.push(config.smp.clone());
    }

    cmd
}

fn flags<'a>(flags: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    flags.iter().map(|flag| flag.to_string())
}

fn display(path: &Path) -> String {
    path.as_os_str().to_string_lossy().into_owned()
}
