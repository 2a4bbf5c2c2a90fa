//! Human-readable and CSV renderings of a finished pass.

use crate::aggregate::AggregateState;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
}

/// One `metric,value` row of the CSV report.
#[derive(Debug, Serialize)]
struct MetricRow<'a> {
    metric: &'a str,
    value: String,
}

/// Writes `state` in the requested format.
pub fn write_report<W: Write>(state: &AggregateState, format: ReportFormat, writer: W) -> Result<()> {
    match format {
        ReportFormat::Text => write_text(state, writer),
        ReportFormat::Csv => write_csv(state, writer),
    }
}

/// Writes the five summary questions with their answers, one per line.
pub fn write_text<W: Write>(state: &AggregateState, mut writer: W) -> Result<()> {
    let balance_question = format!("What is balance of user ID {}?", state.watch_user_id);
    let lines = [
        (
            "What is the total amount in dollars of debits?".to_string(),
            state.total_debit.to_string(),
        ),
        (
            "What is the total amount in dollars of credits?".to_string(),
            state.total_credit.to_string(),
        ),
        (
            "How many autopays were started?".to_string(),
            state.autopay_start_count.to_string(),
        ),
        (
            "How many autopays were ended?".to_string(),
            state.autopay_end_count.to_string(),
        ),
        (balance_question, state.watch_user_balance.to_string()),
    ];

    for (question, answer) in &lines {
        writeln!(writer, "{:<52}{}", question, answer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the counters as `metric,value` rows.
pub fn write_csv<W: Write>(state: &AggregateState, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let rows = [
        MetricRow {
            metric: "total_debit",
            value: state.total_debit.to_string(),
        },
        MetricRow {
            metric: "total_credit",
            value: state.total_credit.to_string(),
        },
        MetricRow {
            metric: "autopay_start_count",
            value: state.autopay_start_count.to_string(),
        },
        MetricRow {
            metric: "autopay_end_count",
            value: state.autopay_end_count.to_string(),
        },
        MetricRow {
            metric: "watch_user_id",
            value: state.watch_user_id.to_string(),
        },
        MetricRow {
            metric: "watch_user_balance",
            value: state.watch_user_balance.to_string(),
        },
    ];

    for row in &rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cents::Cents;

    fn sample_state() -> AggregateState {
        let mut state = AggregateState::new(2_456_938_384_156_277_127);
        state.total_debit = Cents::new(1050);
        state.total_credit = Cents::new(-105);
        state.autopay_start_count = 3;
        state.autopay_end_count = 1;
        state.watch_user_balance = Cents::new(7);
        state
    }

    fn render(format: ReportFormat) -> String {
        let mut output = Vec::new();
        write_report(&sample_state(), format, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_report() {
        let output = render(ReportFormat::Text);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("What is the total amount in dollars of debits?"));
        assert!(lines[0].ends_with(" 10.50"));
        assert!(lines[1].ends_with(" -1.05"));
        assert!(lines[2].ends_with(" 3"));
        assert!(lines[3].ends_with(" 1"));
        assert!(lines[4].contains("2456938384156277127"));
        assert!(lines[4].ends_with(" 0.07"));
    }

    #[test]
    fn test_text_report_aligns_answers() {
        let output = render(ReportFormat::Text);
        for line in output.lines().take(4) {
            assert!(line.len() > 52);
            assert_ne!(line.as_bytes()[52], b' ', "{}", line);
        }
    }

    #[test]
    fn test_csv_report() {
        let output = render(ReportFormat::Csv);
        assert!(output.starts_with("metric,value\n"));
        assert!(output.contains("total_debit,10.50\n"));
        assert!(output.contains("total_credit,-1.05\n"));
        assert!(output.contains("autopay_start_count,3\n"));
        assert!(output.contains("autopay_end_count,1\n"));
        assert!(output.contains("watch_user_id,2456938384156277127\n"));
        assert!(output.contains("watch_user_balance,0.07\n"));
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(ReportFormat::default(), ReportFormat::Text);
    }
}
