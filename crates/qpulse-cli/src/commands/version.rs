//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - pulse-sequence result interpretation",
        style("qpulse").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpulse-results  Expectation values and measurement emulation");
    println!("  qpulse-cli      Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
