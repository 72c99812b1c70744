use owo_colors::OwoColorize;

use super::{theme, vote_label};
use crate::domain::{VoteResultsOverview, VoteValue};

const HEMICYCLE: &str = "🏛️";
const CHECK: &str = "✅";
const CROSS: &str = "❌";
const WARN: &str = "⚠️";
const BAR_WIDTH: usize = 20;

pub fn header(text: &str) {
    println!("{} {}", HEMICYCLE, text.style(theme().title.clone()));
}

pub fn success(msg: &str) {
    println!("{} {}", CHECK, msg.style(theme().passed.clone()));
}

pub fn error(msg: &str) {
    eprintln!("{} {}", CROSS, msg.style(theme().rejected.clone()));
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", WARN, msg.style(theme().abstention.clone()));
}

pub fn field(label: &str, value: &str) {
    println!("  {:<10} {}", label.style(theme().label.clone()), value);
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().title.clone()));
}

/// Print whether a decision was adopted
pub fn outcome(is_passed: bool) {
    if is_passed {
        println!("{} {}", CHECK, "Adopted".style(theme().passed.clone()));
    } else {
        println!("{} {}", CROSS, "Rejected".style(theme().rejected.clone()));
    }
}

/// Print one line per ballot kind with its share of all voters
pub fn tally(results: &VoteResultsOverview) {
    let rows = [
        (VoteValue::InFavor, results.in_favor),
        (VoteValue::Against, results.against),
        (VoteValue::Abstention, results.abstention),
        (VoteValue::Absent, results.absent),
    ];
    for (vote, count) in rows {
        let line = tally_line(vote_label(vote), count, results.total_voters);
        println!("  {}", line.style(theme().vote(vote)));
    }
    println!(
        "  {}",
        format!("{} voters", results.total_voters).style(theme().muted.clone())
    );
}

fn share(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(count) * 100.0 / f64::from(total)
    }
}

fn tally_line(label: &str, count: u32, total: u32) -> String {
    let pct = share(count, total);
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "{:<10} {:>5} {:>5.1}% {}",
        label,
        count,
        pct,
        "█".repeat(filled.min(BAR_WIDTH))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_of_empty_chamber() {
        assert_eq!(share(3, 0), 0.0);
        assert_eq!(share(1, 4), 25.0);
    }

    #[test]
    fn test_tally_line() {
        assert_eq!(tally_line("In favor", 250, 500), "In favor     250  50.0% ██████████");
        assert_eq!(tally_line("Absent", 0, 500), "Absent         0   0.0% ");
        assert!(tally_line("Against", 7, 7).ends_with(&"█".repeat(BAR_WIDTH)));
    }
}
