//! Employee input loading. Accepts either a bare JSON array of records or an
//! object with an `employees` array; `-` reads from stdin.

use std::io::Read;
use std::path::Path;

use bonus_algo::EmployeeRecord;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Deserialize)]
#[serde(untagged)]
enum EmployeeFile {
    List(Vec<EmployeeRecord>),
    Wrapped { employees: Vec<EmployeeRecord> },
}

pub fn parse_employees(json: &str) -> Result<Vec<EmployeeRecord>, CliError> {
    let file: EmployeeFile = serde_json::from_str(json)?;
    Ok(match file {
        EmployeeFile::List(employees) | EmployeeFile::Wrapped { employees } => employees,
    })
}

pub fn load_employees(path: &Path) -> Result<Vec<EmployeeRecord>, CliError> {
    let io_err = |source| CliError::Io {
        path: path.display().to_string(),
        source,
    };

    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    let employees = parse_employees(&json)?;
    tracing::info!(path = %path.display(), count = employees.len(), "employees loaded");
    Ok(employees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let employees = parse_employees(
            r#"[{"id": "A", "bonusTarget": 1000, "rating": 110}, {"id": "B", "target": 500}]"#,
        )
        .unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].rating, Some(110.0));
        assert!(employees[1].rating.is_none());
    }

    #[test]
    fn test_parse_wrapped_object() {
        let employees =
            parse_employees(r#"{"employees": [{"id": "A", "bonusTarget": 1000, "group": "X"}]}"#)
                .unwrap();
        assert_eq!(employees[0].group.as_deref(), Some("X"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_employees(r#"{"people": []}"#).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_employees(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
