use std::path::PathBuf;
use std::{env, io, process};
use tracing::{error, info};

/// Replaces the running launcher with a fresh copy of its executable.
pub fn restart_process(current_executable: PathBuf) -> ! {
    info!("Restarting {}", current_executable.display());
    let err = exec(process::Command::new(&current_executable).args(env::args().skip(1)));
    error!(
        "Failed to restart process {}: {}",
        current_executable.display(),
        err
    );
    process::exit(1);
}

#[cfg(unix)]
fn exec(command: &mut process::Command) -> io::Error {
    use std::os::unix::process::CommandExt as _;
    // Only returns if the new image could not be executed.
    command.exec()
}

#[cfg(not(unix))]
fn exec(command: &mut process::Command) -> io::Error {
    match command.spawn() {
        Ok(_) => process::exit(0),
        Err(err) => err,
    }
}
