pub(crate) mod config;
pub(crate) mod exec;
pub(crate) mod logs;
pub(crate) mod qemu;
