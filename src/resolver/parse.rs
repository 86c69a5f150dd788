use tracing::debug;

use crate::error::{Result, StitchError, ValidationError};
use crate::resolver::types::{Task, TaskList};

/// Repeat count used for every file when no loop counts are given
pub const DEFAULT_REPEAT_COUNT: u32 = 1;

/// Split the raw `--files` value into file names
///
/// An empty string means no inputs were given at all. Empty segments
/// (`a.gif,,b.gif`) are kept and will fail when opened.
pub fn parse_file_list(raw: &str) -> Result<Vec<String>> {
    if raw.is_empty() {
        return Err(ValidationError::NoInputFiles.into());
    }

    Ok(raw.split(',').map(str::to_string).collect())
}

/// Split the raw `--loops` value into repeat counts
///
/// An empty string yields an empty list, which [`resolve`] treats as
/// "repeat every file once".
pub fn parse_loop_list(raw: &str) -> Result<Vec<u32>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(|token| {
            token.trim().parse::<u32>().map_err(|source| {
                StitchError::from(ValidationError::InvalidLoopCount {
                    token: token.to_string(),
                    source,
                })
            })
        })
        .collect()
}

/// Pair file names with loop counts, positionally
///
/// `loops` is either empty (every file gets [`DEFAULT_REPEAT_COUNT`]) or
/// exactly as long as `files`.
pub fn resolve(files: &[String], loops: &[u32]) -> Result<TaskList> {
    if files.is_empty() {
        return Err(ValidationError::NoInputFiles.into());
    }

    if !loops.is_empty() && loops.len() != files.len() {
        return Err(ValidationError::CountMismatch {
            files: files.len(),
            loops: loops.len(),
        }
        .into());
    }

    let tasks: TaskList = files
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let repeat_count = loops.get(i).copied().unwrap_or(DEFAULT_REPEAT_COUNT);
            Task::new(name.as_str(), repeat_count)
        })
        .collect();

    for task in tasks.iter() {
        debug!("Resolved task: {} x{}", task.source, task.repeat_count);
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_file_list_rejected() {
        let result = parse_file_list("");
        assert!(matches!(
            result,
            Err(StitchError::Validation(ValidationError::NoInputFiles))
        ));
    }

    #[test]
    fn test_file_list_keeps_order() {
        let files = parse_file_list("b.gif,a.gif,c.gif").unwrap();
        assert_eq!(files, names(&["b.gif", "a.gif", "c.gif"]));
    }

    #[test]
    fn test_file_list_keeps_empty_segments() {
        let files = parse_file_list("a.gif,,b.gif").unwrap();
        assert_eq!(files, names(&["a.gif", "", "b.gif"]));
    }

    #[test]
    fn test_loop_list() {
        assert!(parse_loop_list("").unwrap().is_empty());
        assert_eq!(parse_loop_list("3").unwrap(), vec![3]);
        assert_eq!(parse_loop_list("1, 0 ,2").unwrap(), vec![1, 0, 2]);
    }

    #[test]
    fn test_invalid_loop_token() {
        for raw in ["x", "1,two", "1,,2", "-1", "1.5"] {
            match parse_loop_list(raw) {
                Err(StitchError::Validation(ValidationError::InvalidLoopCount { .. })) => {}
                other => panic!("expected InvalidLoopCount for {:?}, got {:?}", raw, other),
            }
        }

        if let Err(StitchError::Validation(ValidationError::InvalidLoopCount { token, .. })) =
            parse_loop_list("1,two")
        {
            assert_eq!(token, "two");
        } else {
            panic!("Expected InvalidLoopCount error");
        }
    }

    #[test]
    fn test_default_repeat_count() {
        // files=["a.gif","b.gif"], loops="" -> [(a,1),(b,1)]
        let files = names(&["a.gif", "b.gif"]);
        let tasks = resolve(&files, &[]).unwrap();

        assert_eq!(tasks.len(), files.len());
        assert_eq!(
            tasks.tasks(),
            &[Task::new("a.gif", 1), Task::new("b.gif", 1)]
        );
    }

    #[test]
    fn test_explicit_repeat_counts() {
        let files = names(&["a.gif", "b.gif", "c.gif"]);
        let tasks = resolve(&files, &[3, 0, 1]).unwrap();

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks.get(0), Some(&Task::new("a.gif", 3)));
        assert_eq!(tasks.get(1), Some(&Task::new("b.gif", 0)));
        assert_eq!(tasks.get(2), Some(&Task::new("c.gif", 1)));
        assert_eq!(tasks.total_repeats(), 4);
    }

    #[test]
    fn test_count_mismatch() {
        // files=["a.gif","b.gif"], loops="1"
        let files = names(&["a.gif", "b.gif"]);
        let loops = parse_loop_list("1").unwrap();

        match resolve(&files, &loops) {
            Err(StitchError::Validation(ValidationError::CountMismatch { files, loops })) => {
                assert_eq!(files, 2);
                assert_eq!(loops, 1);
            }
            other => panic!("Expected CountMismatch, got {:?}", other),
        }

        assert!(resolve(&files, &[1, 2, 3]).is_err());
    }

    #[test]
    fn test_resolve_requires_files() {
        assert!(matches!(
            resolve(&[], &[]),
            Err(StitchError::Validation(ValidationError::NoInputFiles))
        ));
    }

    #[test]
    fn test_task_count_matches_file_count() {
        for n in 1..6 {
            let files: Vec<String> = (0..n).map(|i| format!("{}.gif", i)).collect();
            let loops: Vec<u32> = (0..n as u32).collect();

            assert_eq!(resolve(&files, &[]).unwrap().len(), n);
            assert_eq!(resolve(&files, &loops).unwrap().len(), n);
        }
    }
}
