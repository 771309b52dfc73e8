//! CLI command messaging
//!
//! Coloured one-line messages for the non-interactive subcommands
//! (`snapshot`, `theme`) and for startup failures.

const RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[1;33m";
const GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

fn tagged(color: &str, tag: &str, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{}[{}]{} {}", color, tag, RESET, title)
    } else {
        format!("{}[{}]{} {}\t {}", color, tag, RESET, title, details)
    }
}

pub fn print_info(title: &str, details: &str) {
    println!("{}", tagged(YELLOW, "INFO", title, details));
}

/// Errors go to stderr so `snapshot` output stays parseable.
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{}", tagged(RED, "ERROR", title, ""));
    if let Some(details) = details {
        eprintln!("{}", tagged(RED, "ERROR", "Details:", details));
    }
}

pub fn print_success(title: &str, details: &str) {
    println!("{}", tagged(GREEN, "SUCCESS", title, details));
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_are_tab_separated() {
        assert_eq!(
            tagged(GREEN, "SUCCESS", "Theme saved", "light"),
            "\x1b[1;32m[SUCCESS]\x1b[0m Theme saved\t light"
        );
        assert_eq!(
            tagged(YELLOW, "INFO", "Fetching", ""),
            "\x1b[1;33m[INFO]\x1b[0m Fetching"
        );
    }
}
