use colored::*;
use tracing::info;

const BANNER: &str = r#"
 _____      _____ ___ _ __  _ __
/ __\ \ /\ / / _ \/ _ \ '_ \| '__|
\__ \\ V  V /  __/  __/ |_) | |
|___/ \_/\_/ \___|\___| .__/|_|
                      |_|
"#;

pub fn banner() {
    println!("{}", BANNER.cyan());
    println!(
        "{}",
        format!("      FAST ARP SCANNER v{}", env!("CARGO_PKG_VERSION")).cyan()
    );
    println!();
}

/// The wording is fixed, plural included: `Found 1 devices`.
fn found_notice(count: usize) -> String {
    format!("Found {count} devices")
}

pub fn found(count: usize) {
    info!("{}", found_notice(count));
}

/// Printed instead of an empty rendering so a silent segment is never
/// mistaken for a crash.
pub fn no_devices() {
    println!("{}", "[-] No devices found".red().bold());
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
