//! Instance text format.
//!
//! ```text
//! line 1: material_count, dept_count, category_count
//! line 2: category of each material
//! line 3: cost of each material
//! line 4: budget of each department
//! line 5: lower bound of each category
//! line 6: upper bound of each category
//! then one preference row per material (one value per department)
//! ```
//!
//! Values are separated by commas and/or whitespace. Blank lines are ignored.

use std::str::FromStr;

use super::model::{Problem, ProblemBuilder};
use crate::error::{Result, SearchError};

impl FromStr for Problem {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());
        // End-of-input errors point one past the last line of the text.
        let end_line = s.lines().count() + 1;

        let mut next_line = |what: &str| {
            lines.next().ok_or_else(|| SearchError::Parse {
                line: end_line,
                message: format!("unexpected end of input, missing {what}"),
            })
        };

        let (n, header) = next_line("header")?;
        let dims: Vec<usize> = parse_row(n, header, 3)?;
        let (material_count, dept_count, category_count) = (dims[0], dims[1], dims[2]);

        let (n, line) = next_line("material categories")?;
        let category_of = parse_row(n, line, material_count)?;
        let (n, line) = next_line("material costs")?;
        let cost = parse_row(n, line, material_count)?;
        let (n, line) = next_line("department budgets")?;
        let budget = parse_row(n, line, dept_count)?;
        let (n, line) = next_line("category lower bounds")?;
        let lower = parse_row(n, line, category_count)?;
        let (n, line) = next_line("category upper bounds")?;
        let upper = parse_row(n, line, category_count)?;

        let mut preference = Vec::with_capacity(material_count);
        for material in 0..material_count {
            let (n, line) = next_line(&format!("preference row for material {material}"))?;
            preference.push(parse_row(n, line, dept_count)?);
        }

        ProblemBuilder::new(material_count, dept_count, category_count)
            .with_category_of(category_of)
            .with_cost(cost)
            .with_budget(budget)
            .with_category_bounds(lower, upper)
            .with_preference(preference)
            .build()
    }
}

fn parse_row<T: FromStr>(line_no: usize, line: &str, expected: usize) -> Result<Vec<T>> {
    let values = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<T>().map_err(|_| SearchError::Parse {
                line: line_no,
                message: format!("invalid number {tok:?}"),
            })
        })
        .collect::<Result<Vec<T>>>()?;

    if values.len() < expected {
        return Err(SearchError::Parse {
            line: line_no,
            message: format!("expected {expected} values, found {}", values.len()),
        });
    }
    Ok(values.into_iter().take(expected).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
3, 2, 2
0, 1, 1
4.0, 2.5, 3
10, 6
1, 0
1, 2
0.9, 0.1
0.2, 0.8
0.5, 0.5
";

    #[test]
    fn test_parse_small_instance() {
        let problem: Problem = SMALL.parse().unwrap();
        assert_eq!(problem.material_count(), 3);
        assert_eq!(problem.dept_count(), 2);
        assert_eq!(problem.category_count(), 2);
        assert_eq!(problem.category_of(2), 1);
        assert!((problem.cost(1) - 2.5).abs() < 1e-12);
        assert!((problem.budget(1) - 6.0).abs() < 1e-12);
        assert_eq!(problem.category_lower(0), 1);
        assert_eq!(problem.category_upper(1), 2);
        assert!((problem.preference(1, 1) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_parse_whitespace_separated() {
        let text = "1 1 1\n0\n5\n10\n0\n1\n0.7\n";
        let problem: Problem = text.parse().unwrap();
        assert!((problem.preference(0, 0) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_parse_missing_preference_row() {
        let truncated: String = SMALL.lines().take(8).collect::<Vec<_>>().join("\n");
        let err = truncated.parse::<Problem>().unwrap_err();
        assert!(matches!(err, SearchError::Parse { .. }));
        assert!(err.to_string().contains("material 2"));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let spaced = "\n3, 2, 2\n\n0, 1, 1\n   \n4.0, 2.5, 3\n10, 6\n\n1, 0\n1, 2\n0.9, 0.1\n\n0.2, 0.8\n0.5, 0.5\n\n";
        let a: Problem = spaced.parse().unwrap();
        let b: Problem = SMALL.parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_end_of_input_reports_next_line() {
        // Eight lines, the third preference row missing.
        let truncated: String = SMALL.lines().take(8).collect::<Vec<_>>().join("\n");
        match truncated.parse::<Problem>() {
            Err(SearchError::Parse { line, .. }) => assert_eq!(line, 9),
            other => panic!("expected parse error, got {other:?}"),
        }

        match "".parse::<Problem>() {
            Err(SearchError::Parse { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("header"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_bad_number_reports_line() {
        let text = SMALL.replace("4.0, 2.5, 3", "4.0, abc, 3");
        match text.parse::<Problem>() {
            Err(SearchError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_short_row() {
        let text = SMALL.replace("10, 6", "10");
        match text.parse::<Problem>() {
            Err(SearchError::Parse { line, message }) => {
                assert_eq!(line, 4);
                assert!(message.contains("expected 2"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
