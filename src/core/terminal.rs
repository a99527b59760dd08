use console::{Emoji, style};

pub static SUCCESS_ICON: Emoji<'_, '_> = Emoji("✅ ", "");
pub static INFO_ICON: Emoji<'_, '_> = Emoji("ℹ️  ", "");
pub static WARN_ICON: Emoji<'_, '_> = Emoji("⚠️  ", "");
pub static ERROR_ICON: Emoji<'_, '_> = Emoji("❌ ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

pub fn print_success(msg: &str) {
    println!("{} {}", SUCCESS_ICON, style(msg).green());
}

pub fn print_info(msg: &str) {
    println!("{} {}", INFO_ICON, style(msg).blue());
}

pub fn print_warn(msg: &str) {
    println!("{} {}", WARN_ICON, style(msg).yellow());
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", ERROR_ICON, style(msg).red().bold());
}

pub fn print_status(label: &str, msg: &str) {
    println!("  {} {}: {}", GEAR, style(label).bold().cyan(), msg);
}

pub fn print_banner() {
    let lines: &[&str] = &[
        " _       _       __              _ ",
        "| |_ ___| | ___ / _|_      ____| |",
        "| __/ _ \\ |/ _ \\ |_\\ \\ /\\ / / _` |",
        "| ||  __/ |  __/  _|\\ V  V / (_| |",
        " \\__\\___|_|\\___|_|   \\_/\\_/ \\__,_|",
    ];

    println!();
    for line in lines {
        println!("{}", style(line).cyan().bold());
    }
    println!("{}\n", style("Channel relays that never sleep.").dim());
}
