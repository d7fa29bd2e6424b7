//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum job features for model training",
        style("qjobs").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qjobs-hal          Remote service abstraction");
    println!("  qjobs-adapter-ibm  IBM Quantum REST adapter");
    println!("  qjobs-dataset      Feature collection and CSV export");
    println!("  qjobs-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
