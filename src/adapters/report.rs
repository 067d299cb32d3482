//! Plain-Text Report Renderer
//!
//! Turns an `AnalysisResult` into the terminal report: headline moments,
//! per-tier drop statistics, calendar seasonality and a closing regime
//! interpretation. Undefined statistics render as words ("never",
//! "no events"), never as a fabricated number.

use std::fmt::Write;

use crate::domain::analysis::AnalysisResult;
use crate::domain::regime::RegimeLabel;
use crate::domain::seasonality::weekday_name;

/// Render the full analysis report for one ticker
pub fn render_report(result: &AnalysisResult, ticker: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Return regime report: {ticker}");
    let _ = writeln!(out, "{}", "=".repeat(22 + ticker.len()));
    let _ = writeln!(
        out,
        "observations : {} daily returns",
        result.sample_count
    );
    let _ = writeln!(
        out,
        "mean / stdev : {} / {}",
        pct(result.mean_return),
        pct(result.std_dev)
    );
    let _ = writeln!(
        out,
        "last return  : {}   range [{}, {}]",
        pct(result.last_return),
        pct(result.min_return),
        pct(result.max_return)
    );
    let _ = writeln!(out, "regime       : {}", result.regime);
    let _ = writeln!(out);

    let _ = writeln!(out, "Drop tiers");
    let _ = writeln!(out, "----------");
    for tier in &result.tiers {
        let _ = writeln!(
            out,
            "{} at {}",
            tier.severity.label(),
            pct(tier.threshold)
        );
        let _ = writeln!(out, "  events          : {}", tier.event_count);

        let recency = match tier.days_since_last {
            Some(days) => format!("{days} days ago"),
            None => "never".to_string(),
        };
        let _ = writeln!(out, "  last occurrence : {recency}");

        if let Some(rebound) = &tier.rebound {
            let line = match rebound.probability {
                Some(p) => format!("{} (n={})", pct(p), rebound.sample_count),
                None => "no evaluable events".to_string(),
            };
            let _ = writeln!(out, "  next-day rebound: {line}");
        }

        if let Some(gaps) = &tier.gaps {
            let line = match gaps.mean_gap_days {
                Some(mean) => format!(
                    "mean {:.1} days, recent {:?}",
                    mean, gaps.last_gaps
                ),
                None => "fewer than 2 events".to_string(),
            };
            let _ = writeln!(out, "  gaps            : {line}");
        }

        if let Some(horizons) = &tier.horizons {
            let _ = writeln!(out, "  forward returns :");
            for (h, stats) in horizons {
                if stats.sample_count == 0 {
                    let _ = writeln!(out, "    +{h}d : no data");
                    continue;
                }
                let _ = writeln!(
                    out,
                    "    +{}d : {} positive, avg gain {}, avg loss {} (n={})",
                    h,
                    opt_pct(stats.prob_positive),
                    opt_pct(stats.mean_gain),
                    opt_pct(stats.mean_loss),
                    stats.sample_count
                );
            }
        }
        let _ = writeln!(out);
    }

    if let Some(seasonality) = &result.seasonality {
        let _ = writeln!(out, "Seasonality (mean daily return)");
        let _ = writeln!(out, "-------------------------------");
        let weekdays: Vec<String> = seasonality
            .by_weekday
            .iter()
            .map(|(key, mean)| format!("{} {}", weekday_name(*key), pct(*mean)))
            .collect();
        let _ = writeln!(out, "weekday : {}", weekdays.join(" | "));

        if let Some((best_month, best)) = extreme(&seasonality.by_month, true) {
            let _ = writeln!(out, "best month  : {} ({})", month_name(best_month), pct(best));
        }
        if let Some((worst_month, worst)) = extreme(&seasonality.by_month, false) {
            let _ = writeln!(out, "worst month : {} ({})", month_name(worst_month), pct(worst));
        }
        if let Some((best_day, best)) = extreme(&seasonality.by_day_of_month, true) {
            let _ = writeln!(out, "best day of month : {best_day} ({})", pct(best));
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Interpretation");
    let _ = writeln!(out, "--------------");
    let _ = writeln!(out, "{}", regime_note(result.regime));
    let _ = writeln!(
        out,
        "A rebound rate above 50% suggests a statistical bounce after drops \
         (never a guarantee); below 50% indicates persistent weakness."
    );
    let _ = writeln!(
        out,
        "A long stretch without severe drops does not mean low risk: tail \
         events cluster and long quiet spells end."
    );

    out
}

fn regime_note(regime: RegimeLabel) -> &'static str {
    match regime {
        RegimeLabel::Stable => "Statistically stable regime over the recent window.",
        RegimeLabel::Elevated => {
            "Elevated volatility: a strong drop occurred recently. Tactical caution."
        }
        RegimeLabel::HighRisk => {
            "High-risk regime: a very strong drop occurred recently. Prioritize risk management."
        }
    }
}

/// Format a fractional return as a signed percentage
fn pct(value: f64) -> String {
    format!("{:+.3}%", value * 100.0)
}

fn opt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => pct(v),
        None => "n/a".to_string(),
    }
}

fn extreme(map: &std::collections::BTreeMap<u32, f64>, best: bool) -> Option<(u32, f64)> {
    let cmp = |a: &(&u32, &f64), b: &(&u32, &f64)| a.1.partial_cmp(b.1).unwrap();
    let entry = if best {
        map.iter().max_by(cmp)
    } else {
        map.iter().min_by(cmp)
    };
    entry.map(|(k, v)| (*k, *v))
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
