use crate::version::Version;

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_warning(message: &str) {
    eprintln!("\x1b[33mWARNING:\x1b[0m {}", message); // Yellow color
}

pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message); // Green color
}

pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}

pub fn display_version_change(old: Version, new: Version) {
    println!("\n\x1b[1mVersion bump:\x1b[0m");
    println!("  From: \x1b[31m{}\x1b[0m", old);
    println!("  To:   \x1b[32m{}\x1b[0m", new);
}
