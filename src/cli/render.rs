//! Terminal rendering for goals, comparisons, and the activity feed.

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::core::{GoalWithProgress, RankBadge, RankedComparison, TrackerSummary};
use crate::currency::{format_amount, format_date, format_relative, LocaleConfig};
use crate::domain::{ActivityFeedItem, ActivityKind};

const BAR_WIDTH: usize = 24;

/// Textual progress bar, gold once the goal is complete.
pub fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    );
    if percentage >= 100.0 {
        bar.yellow().to_string()
    } else {
        bar.green().to_string()
    }
}

pub fn goal_card(item: &GoalWithProgress, locale: &LocaleConfig) -> String {
    let goal = &item.goal;
    let progress = &item.progress;
    let title = if goal.is_completed {
        format!("{} {}", goal.name.bold(), "✔ conquistada".yellow())
    } else {
        goal.name.bold().to_string()
    };
    let eta = if goal.is_completed {
        String::new()
    } else {
        format!(
            "  ETA: {} ({} dias)",
            format_date(progress.estimated_date.date_naive()),
            progress.estimated_days
        )
    };
    format!(
        "{title}\n  {} {:>5.1}%  {} de {}\n  Dinheiro: {}  Pix: {}{eta}",
        progress_bar(progress.progress_percentage),
        progress.progress_percentage,
        format_amount(progress.total_amount, locale).bold(),
        format_amount(goal.target_amount, locale),
        format_amount(goal.current_cash, locale).green(),
        format_amount(goal.current_pix, locale).cyan(),
    )
}

pub fn comparison_row(ranked: &RankedComparison, locale: &LocaleConfig) -> String {
    let entry = &ranked.entry;
    let badge = match ranked.badge {
        Some(RankBadge::Leader) => "🏆".to_string(),
        Some(RankBadge::Position(position)) => format!("#{position}"),
        None => format!("#{}", ranked.rank + 1),
    };
    let name = if entry.is_self {
        format!("{} {}", entry.user_name.bold(), "(você)".magenta())
    } else {
        entry.user_name.clone()
    };
    format!(
        "{badge:>3} {name} — {}\n     {} {:>5.1}%  total {}  ETA {}d",
        entry.goal_name.bright_black(),
        progress_bar(entry.progress_percentage),
        entry.progress_percentage,
        format_amount(entry.total_amount, locale),
        entry.estimated_days,
    )
}

pub fn feed_line(item: &ActivityFeedItem, now: DateTime<Utc>, locale: &LocaleConfig) -> String {
    let when = format_relative(item.created_at, now).bright_black();
    let headline = match item.kind {
        ActivityKind::Transaction => {
            let amount = item
                .amount
                .map(|amount| format_amount(amount, locale))
                .unwrap_or_default();
            let method = item
                .method
                .map(|method| method.to_string())
                .unwrap_or_default();
            format!(
                "{} guardou {} ({method}) em {}",
                item.user_name.bold(),
                amount.green(),
                item.goal_name
            )
        }
        ActivityKind::GoalCompleted => format!(
            "{} {} a meta {}",
            item.user_name.bold(),
            "conquistou".yellow(),
            item.goal_name.bold()
        ),
        ActivityKind::GoalCreated => format!(
            "{} criou a meta {}",
            item.user_name.bold(),
            item.goal_name
        ),
        ActivityKind::BadgeEarned => {
            format!("{} ganhou um selo", item.user_name.bold())
        }
    };
    format!("• {headline}  {when}")
}

pub fn summary_block(summary: &TrackerSummary, locale: &LocaleConfig) -> String {
    format!(
        "Saldo total:  {}\nDinheiro:     {}\nPix:          {}\nMeta total:   {}\nProgresso médio: {:.0}%\nConquistadas: {}/{}",
        format_amount(summary.total_balance, locale).bold(),
        format_amount(summary.total_cash, locale).green(),
        format_amount(summary.total_pix, locale).cyan(),
        format_amount(summary.total_target, locale),
        summary.average_progress,
        summary.completed_goals,
        summary.goal_count,
    )
}
