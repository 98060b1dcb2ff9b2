//! Output macros for the cm CLI.
//!
//! Command results go to stdout through `cm_println!`. Failures and hints go
//! to stderr so command output can be piped.

#[macro_export]
macro_rules! cm_println {
    () => {
        println!();
    };
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! cm_error {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! cm_error_hint {
    ($($arg:tt)*) => {
        eprintln!("💡 {}", format!($($arg)*));
    };
}
