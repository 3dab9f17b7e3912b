/// Errors raised while parsing a single profile clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Box size field is not `s` or `w,h,d`
    InvalidSizeFormat(String),
    /// Box position field is not `x,y,z`
    InvalidPositionFormat(String),
    /// Line has fewer than two points (number of points found)
    InsufficientPoints(usize),
    /// Line vertex is not `x,y,z`
    InvalidPointFormat(String),
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::InvalidSizeFormat(field) => {
                write!(f, "Wrong input for size of the box: '{}'", field)
            }
            ProfileError::InvalidPositionFormat(field) => {
                write!(f, "Wrong input for position of the box: '{}'", field)
            }
            ProfileError::InsufficientPoints(count) => write!(
                f,
                "Not enough points for forming a line: found {}, need at least 2",
                count
            ),
            ProfileError::InvalidPointFormat(segment) => {
                write!(f, "Wrong input for point in line: '{}'", segment)
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// A clause that was skipped while parsing a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseError {
    /// Position of the clause in the `;`-separated batch
    pub index: usize,
    /// The clause text, trimmed
    pub clause: String,
    pub error: ProfileError,
}

impl std::fmt::Display for ClauseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "clause #{} '{}': {}", self.index, self.clause, self.error)
    }
}

impl std::error::Error for ClauseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_field() {
        let err = ProfileError::InvalidSizeFormat("1,2".to_string());
        assert!(err.to_string().contains("'1,2'"));

        let err = ProfileError::InsufficientPoints(1);
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn test_clause_error_source() {
        use std::error::Error;

        let err = ClauseError {
            index: 3,
            clause: "bad".to_string(),
            error: ProfileError::InvalidPositionFormat(String::new()),
        };
        assert!(err.to_string().starts_with("clause #3 'bad'"));
        assert!(err.source().is_some());
    }
}
