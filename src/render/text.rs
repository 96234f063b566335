use crate::render::{ReportView, SequenceView};

/// Console report, e.g.
///
/// ```text
/// Processed 1000 lines (997 records, 3 skipped) from 7 users; 312 distinct sequences of 3.
///
/// Calculated 9 visits to the following endpoint sequence:
/// /login -> /auth -> /home
/// ```
pub fn render_text_report(view: &ReportView) -> String {
    let t = &view.totals;
    let mut lines = vec![format!(
        "Processed {} ({}, {} skipped) from {}; {} of {}.",
        counted(t.lines, "line"),
        counted(t.records, "record"),
        t.skipped,
        counted(t.users as u64, "user"),
        counted(t.distinct_sequences as u64, "distinct sequence"),
        view.seqlen
    )];
    lines.push(String::new());

    match &view.winner {
        Some(winner) => {
            lines.push(format!(
                "Calculated {} to the following endpoint sequence:",
                counted(winner.count, "visit")
            ));
            lines.push(arrow_path(winner));
        }
        None => lines.push(format!(
            "Insufficient data: no user visited {}.",
            counted(view.seqlen as u64, "endpoint")
        )),
    }

    if !view.top.is_empty() {
        lines.push(String::new());
        lines.push(format!("Top {}:", counted(view.top.len() as u64, "sequence")));
        let width = view.top[0].count.to_string().len();
        for seq in &view.top {
            lines.push(format!("  {:>width$}  {}", seq.count, arrow_path(seq)));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// "1 line", "2 lines".
fn counted(n: u64, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn arrow_path(seq: &SequenceView) -> String {
    seq.endpoints.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AggregatorConfig, KeyOrder};
    use crate::render::TotalsView;
    use pretty_assertions::assert_eq;

    fn totals() -> TotalsView {
        TotalsView {
            lines: 10,
            records: 9,
            skipped: 1,
            users: 2,
            distinct_sequences: 4,
        }
    }

    #[test]
    fn winner_and_top() {
        let view = ReportView {
            seqlen: 2,
            order: KeyOrder::Chronological,
            totals: totals(),
            winner: Some(SequenceView {
                endpoints: vec!["/login".into(), "/home".into()],
                count: 12,
            }),
            top: vec![
                SequenceView {
                    endpoints: vec!["/login".into(), "/home".into()],
                    count: 12,
                },
                SequenceView {
                    endpoints: vec!["/".into(), "/logout".into()],
                    count: 3,
                },
            ],
        };
        assert_eq!(
            render_text_report(&view),
            "Processed 10 lines (9 records, 1 skipped) from 2 users; 4 distinct sequences of 2.\n\
             \n\
             Calculated 12 visits to the following endpoint sequence:\n\
             /login -> /home\n\
             \n\
             Top 2 sequences:\n\
             \x20 12  /login -> /home\n\
             \x20  3  / -> /logout\n"
        );
    }

    #[test]
    fn insufficient_data() {
        let cfg = AggregatorConfig::default();
        let view = ReportView {
            seqlen: cfg.seqlen.get(),
            order: cfg.order,
            totals: totals(),
            winner: None,
            top: vec![],
        };
        let out = render_text_report(&view);
        assert!(out.ends_with("Insufficient data: no user visited 3 endpoints.\n"));
    }

    #[test]
    fn singular_counts_read_as_singular() {
        let view = ReportView {
            seqlen: 1,
            order: KeyOrder::Chronological,
            totals: TotalsView {
                lines: 1,
                records: 1,
                skipped: 0,
                users: 1,
                distinct_sequences: 1,
            },
            winner: Some(SequenceView {
                endpoints: vec!["/home".into()],
                count: 1,
            }),
            top: vec![SequenceView {
                endpoints: vec!["/home".into()],
                count: 1,
            }],
        };
        assert_eq!(
            render_text_report(&view),
            "Processed 1 line (1 record, 0 skipped) from 1 user; 1 distinct sequence of 1.\n\
             \n\
             Calculated 1 visit to the following endpoint sequence:\n\
             /home\n\
             \n\
             Top 1 sequence:\n\
             \x20 1  /home\n"
        );

        let empty = ReportView {
            winner: None,
            top: vec![],
            ..view
        };
        assert!(
            render_text_report(&empty).ends_with("Insufficient data: no user visited 1 endpoint.\n")
        );
    }
}
