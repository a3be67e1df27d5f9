//! Devices command: list the builtin device profiles.

use clap::Args;

use crate::error::Result;
use crate::output::Printer;
use crate::types::{BuiltinDevices, DeviceProfile};

/// List builtin device profiles
#[derive(Args, Debug)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs, printer: &Printer) -> Result<()> {
    for device in BuiltinDevices::all() {
        println!("{}", describe(&device));
    }
    printer.info("Listed", &format!("{} builtin devices", BuiltinDevices::all().len()));
    Ok(())
}

/// One line per device: name, size, platform and archive folder.
pub fn describe(device: &DeviceProfile) -> String {
    format!(
        "{:<16} {:>5}x{:<5} {:<8} {}/",
        device.name,
        device.width,
        device.height,
        device.platform().dir(),
        device.folder()
    )
}
