//! Batch pipeline: ingested rows -> parallel calculation -> results + row errors.
//!
//! Requests are independent and the calculator is pure, so rows are computed
//! in parallel with no coordination. Output order follows input order.

use rayon::prelude::*;

use crate::calc::compute_demand;
use crate::io::{BatchInput, BatchResult, RowError};

/// All outputs of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    pub results: Vec<BatchResult>,
    /// Ingest errors followed by calculation errors, each in line order.
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Compute every pending request in `input`.
pub fn run_batch(input: BatchInput) -> BatchOutput {
    let computed: Vec<_> = input
        .requests
        .into_par_iter()
        .map(|pending| {
            let outcome = compute_demand(&pending.request);
            (pending, outcome)
        })
        .collect();

    let mut results = Vec::with_capacity(computed.len());
    let mut row_errors = input.row_errors;
    for (pending, outcome) in computed {
        match outcome {
            Ok(result) => results.push(BatchResult {
                id: pending.id,
                request: pending.request,
                result,
            }),
            Err(e) => row_errors.push(RowError {
                line: pending.line,
                id: Some(pending.id),
                message: e.to_string(),
            }),
        }
    }

    BatchOutput {
        results,
        row_errors,
        rows_read: input.rows_read,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_requests;

    #[test]
    fn batch_keeps_input_order_and_reports_failures() {
        let mut csv = String::from("id,use,bedrooms,building,dwellings,category,occupants,temperature_c\n");
        for i in 1..=40 {
            csv.push_str(&format!("r{i},residential,{},collective,{i},,,\n", (i % 7) + 1));
        }
        csv.push_str("zero,tertiary,,,,offices,0,\n");
        csv.push_str("cold,residential,2,single,,,,15\n");

        let input = read_requests(csv.as_bytes(), 60.0).unwrap();
        assert!(input.row_errors.is_empty());

        let out = run_batch(input);
        assert_eq!(out.rows_read, 42);
        assert_eq!(out.results.len(), 40);
        for (i, r) in out.results.iter().enumerate() {
            assert_eq!(r.id, format!("r{}", i + 1));
            assert!(r.result.demand_l_per_day > 0.0);
        }

        assert_eq!(out.row_errors.len(), 2);
        assert_eq!(out.row_errors[0].id.as_deref(), Some("zero"));
        assert!(out.row_errors[0].message.contains("occupant count"));
        assert_eq!(out.row_errors[1].line, 43);
    }
}
