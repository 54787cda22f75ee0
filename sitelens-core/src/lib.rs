pub mod analysis;
pub mod cache;
pub mod report;

pub use analysis::{AnalyzeOptions, execute_analysis};
pub use cache::ModelCache;
pub use report::ReportFormat;

use colored::Colorize;

pub fn print_banner() {
    println!();
    println!(
        "{}",
        r#"     _ _       _
 ___(_) |_ ___| | ___ _ __  ___
/ __| | __/ _ \ |/ _ \ '_ \/ __|
\__ \ | ||  __/ |  __/ | | \__ \
|___/_|\__\___|_|\___|_| |_|___/"#
            .bright_cyan()
    );
    println!(
        "{} {}",
        "  bounded site template discovery".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_blue()
    );
    println!();
}
