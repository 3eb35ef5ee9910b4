use std::path::{Path, PathBuf};

use crate::{
    cli::{Arch, Args, DebugconMode, LogMode, SerialMode},
    error::RunnerError,
};

/// How the boot image is attached to the machine
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ImageType {
    /// `.hdd`, attached as the primary hard disk
    Hdd,
    /// `.iso`, attached as a CD-ROM
    Iso,
}

impl ImageType {
    pub(crate) const SUPPORTED: &'static str = ".hdd, .iso";

    /// Determines the image type from the file extension of `image`.
    pub(crate) fn from_path(image: &Path) -> Result<Self, RunnerError> {
        match image.extension().and_then(|ext| ext.to_str()) {
            Some("hdd") => Ok(ImageType::Hdd),
            Some("iso") => Ok(ImageType::Iso),
            _ => {
                let suffix = image
                    .extension()
                    .map(|ext| format!(".{}", ext.to_string_lossy()))
                    .unwrap_or_default();
                Err(RunnerError::InvalidImageType(suffix))
            }
        }
    }
}

/// Validated run configuration. Built once from the command line and never modified.
#[derive(Debug, Clone)]
pub(crate) struct RunConfig {
    pub arch: Arch,
    pub bios: bool,
    pub debug: bool,
    pub debugcon: Option<DebugconMode>,
    pub image: PathBuf,
    pub image_type: ImageType,
    pub kvm: bool,
    pub log: Option<LogMode>,
    pub monitor: bool,
    pub serial: Option<SerialMode>,
    pub smp: String,
    pub verbose: bool,
}

impl RunConfig {
    /// Name of the QEMU executable for the configured architecture
    pub(crate) fn qemu(&self) -> String {
        format!("qemu-system-{}", self.arch.as_str())
    }

    /// Whether any output channel is redirected to a log file
    pub(crate) fn needs_log_files(&self) -> bool {
        self.debugcon == Some(DebugconMode::File)
            || self.log == Some(LogMode::File)
            || self.serial == Some(SerialMode::File)
    }
}

impl TryFrom<Args> for RunConfig {
    type Error = RunnerError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.bios && !args.arch.supports_bios() {
            return Err(RunnerError::UnsupportedBiosArch);
        }

        let image = args
            .image
            .unwrap_or_else(|| PathBuf::from(format!("aster-{}.iso", args.arch.as_str())));
        let image_type = ImageType::from_path(&image)?;

        Ok(RunConfig {
            arch: args.arch,
            bios: args.bios,
            debug: args.debug,
            debugcon: args.debugcon,
            image,
            image_type,
            kvm: args.kvm,
            log: args.log,
            monitor: args.monitor,
            serial: args.serial,
            smp: args.smp,
            verbose: args.verbose,
        })
    }
}
