/// Report whether file descriptor `fd` refers to an interactive terminal.
///
/// Any failure of the underlying query (closed or invalid descriptor)
/// reads as "not a terminal".
#[cfg(unix)]
pub fn is_terminal(fd: i32) -> bool {
    // SAFETY: isatty only inspects the descriptor and reports failure
    // through its return value.
    unsafe { libc::isatty(fd) == 1 }
}

#[cfg(not(unix))]
pub fn is_terminal(fd: i32) -> bool {
    use std::io::IsTerminal;

    match fd {
        0 => std::io::stdin().is_terminal(),
        1 => std::io::stdout().is_terminal(),
        2 => std::io::stderr().is_terminal(),
        _ => false,
    }
}

/// Descriptor of the process standard output.
pub const STDOUT_FD: i32 = 1;
